//! Polygon modifications used to maintain clearance gaps and sanitize part loops before nesting.
//! Offsetting and cleaning rely on the [`geo`](https://crates.io/crates/geo) ecosystem.

use anyhow::Result;
use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::geometry::calculate_area;
use crate::geometry::primitives::Point;

/// Offsets a closed loop outwards (positive `delta`) or inwards (negative `delta`).
/// Corners are mitred by the straight skeleton of [`geo_buffer`].
/// The result can contain zero (loop collapsed), one or several (loop split) polygons.
#[cfg(feature = "shape-modification")]
pub fn offset_loop(points: &[Point], delta: f64) -> Result<Vec<Vec<Point>>> {
    anyhow::ensure!(
        points.len() >= 3,
        "cannot offset a loop with {} points",
        points.len()
    );
    let geo_poly = to_geo_polygon(points);
    let offset = geo_buffer::buffer_polygon(&geo_poly, delta);

    Ok(offset.0.iter().map(|p| from_geo_line_string(p.exterior())).collect())
}

#[cfg(not(feature = "shape-modification"))]
pub fn offset_loop(_points: &[Point], _delta: f64) -> Result<Vec<Vec<Point>>> {
    anyhow::bail!(
        "cannot offset loops without the geo dependencies, compile with --features shape-modification to enable this"
    )
}

/// Picks the polygon with the largest area out of the result of an offset.
pub fn simplify(polygons: Vec<Vec<Point>>) -> Option<Vec<Point>> {
    polygons
        .into_iter()
        .filter(|p| p.len() >= 3)
        .max_by_key(|p| OrderedFloat(calculate_area(p).abs()))
}

/// Removes near-duplicate consecutive vertices and vertices deviating less than `tolerance`
/// from the line through their neighbours (Ramer–Douglas–Peucker).
#[cfg(feature = "shape-modification")]
pub fn clean_loop(points: &[Point], tolerance: f64) -> Result<Vec<Point>> {
    use geo::Simplify;

    let deduplicated = dedup_loop(points, tolerance);
    anyhow::ensure!(
        deduplicated.len() >= 3,
        "loop degenerates to {} points when cleaned with tolerance {tolerance}",
        deduplicated.len()
    );
    let cleaned = to_geo_polygon(&deduplicated).simplify(&tolerance);
    let cleaned = from_geo_line_string(cleaned.exterior());
    match cleaned.len() >= 3 {
        true => Ok(cleaned),
        false => Ok(deduplicated),
    }
}

#[cfg(not(feature = "shape-modification"))]
pub fn clean_loop(_points: &[Point], _tolerance: f64) -> Result<Vec<Point>> {
    anyhow::bail!(
        "cannot clean loops without the geo dependencies, compile with --features shape-modification to enable this"
    )
}

fn dedup_loop(points: &[Point], tolerance: f64) -> Vec<Point> {
    let sq_tolerance = tolerance * tolerance;
    let mut deduplicated = points
        .iter()
        .copied()
        .dedup_by(|a, b| a.sq_distance(*b) <= sq_tolerance)
        .collect_vec();
    //the loop is closed, so the last point can duplicate the first
    while deduplicated.len() > 1
        && deduplicated[0].sq_distance(deduplicated[deduplicated.len() - 1]) <= sq_tolerance
    {
        deduplicated.pop();
    }
    deduplicated
}

#[cfg(feature = "shape-modification")]
fn to_geo_polygon(points: &[Point]) -> geo_types::Polygon<f64> {
    //exterior is expected counterclockwise
    let exterior = match calculate_area(points) < 0.0 {
        true => points.iter().rev().map(|p| (p.0, p.1)).collect(),
        false => points.iter().map(|p| (p.0, p.1)).collect(),
    };
    geo_types::Polygon::new(exterior, vec![])
}

#[cfg(feature = "shape-modification")]
fn from_geo_line_string(ls: &geo_types::LineString<f64>) -> Vec<Point> {
    let mut points = ls.points().map(|p| Point(p.x(), p.y())).collect_vec();
    //pop the last point if it is the same as the first
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}
