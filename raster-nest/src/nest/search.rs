use std::cmp::Ordering;

use itertools::Itertools;
use log::debug;

use crate::entities::{Entity, NestedPartOrigin, NestingState, Part, PartKey};
use crate::geometry::geo_traits::{Bounded, CollidesWith, DistanceTo};
use crate::geometry::primitives::{Point, Rect, Vector};
use crate::raster::{GridEvaluator, NoFitRasterEngine, Raster, raster_difference};
use crate::util::FPA;

/// Location found for a part: the minimum corner of its nesting bounds,
/// and the part in whose hole it lies, if any.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub location: Point,
    pub embedded_in: Option<PartKey>,
}

/// Everything a part placed inside `hole` may not touch:
/// the region outside the hole and a band of width `clearance` along its boundary.
#[derive(Clone, Copy, Debug)]
pub struct HoleObstacle<'a> {
    pub hole: &'a Entity,
    pub clearance: f64,
}

impl Bounded for HoleObstacle<'_> {
    fn bounds(&self) -> Option<Rect> {
        self.hole.bounds()
    }
}

impl CollidesWith<Point> for HoleObstacle<'_> {
    fn collides_with(&self, p: &Point) -> bool {
        !self.hole.collides_with(p) || FPA(self.hole.distance_to(p)) < FPA(self.clearance)
    }
}

/// A shape seen from a frame whose origin lies at `anchor`.
/// Every feasible region is sampled in its own frame, so that its minimum corner is always a candidate.
#[derive(Clone, Copy, Debug)]
struct Anchored<'a, S> {
    shape: &'a S,
    anchor: Point,
}

impl<S: Bounded> Bounded for Anchored<'_, S> {
    fn bounds(&self) -> Option<Rect> {
        self.shape
            .bounds()
            .map(|b| b.translate(self.anchor.vector_to(Point::ORIGIN)))
    }
}

impl<S: CollidesWith<Point>> CollidesWith<Point> for Anchored<'_, S> {
    fn collides_with(&self, p: &Point) -> bool {
        self.shape
            .collides_with(&(*p + Point::ORIGIN.vector_to(self.anchor)))
    }
}

/// Region in which the minimum corner of a rectangle of `size` can be put while staying within `container`.
pub fn inner_fit(container: Rect, size: Vector) -> Option<Rect> {
    Rect::try_new(
        container.x_min,
        container.y_min,
        container.x_max - size.0,
        container.y_max - size.1,
    )
    .ok()
}

/// Cost of a candidate location. Candidates are ranked by
/// the growth of the occupied envelope, then the lowest y, then the lowest x.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementCost {
    pub envelope_growth: f64,
    pub y: f64,
    pub x: f64,
}

impl PlacementCost {
    pub fn new(candidate: Rect, envelope: Option<Rect>) -> Self {
        let envelope_growth = match envelope {
            Some(env) => Rect::bounding_rect(env, candidate).area() - env.area(),
            None => candidate.area(),
        };
        PlacementCost {
            envelope_growth,
            y: candidate.y_min,
            x: candidate.x_min,
        }
    }

    /// Total order on costs, values within [`FPA`] tolerance are considered equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        fpa_cmp(self.envelope_growth, other.envelope_growth)
            .then_with(|| fpa_cmp(self.y, other.y))
            .then_with(|| fpa_cmp(self.x, other.x))
    }
}

fn fpa_cmp(a: f64, b: f64) -> Ordering {
    match FPA(a) == FPA(b) {
        true => Ordering::Equal,
        false => a.total_cmp(&b),
    }
}

/// Area of the sheet in which a candidate can be put
#[derive(Clone, Copy, Debug)]
enum SafeArea<'a> {
    Sheet,
    Hole {
        container: PartKey,
        hole: &'a Entity,
        hole_rect: Rect,
    },
}

/// Searches a location for `part` on the sheet, or inside a hole of one of the nested parts.
///
/// Candidate locations are the dots of the inner-fit region of every safe area,
/// minus the no-fit rasters of all obstacles in that area.
/// Each inner-fit region is rasterized from its own minimum corner, which is therefore always a candidate.
/// Candidates are tried in the order of their [`PlacementCost`], the first one that passes
/// an exact check on the nesting bounds is returned. None if the part fits nowhere.
pub fn nest_by_bounding_boxes<E: GridEvaluator>(
    part: &Part,
    state: &NestingState,
    sheet_bounds: Rect,
    engine: &NoFitRasterEngine<E>,
) -> Option<Placement> {
    let gap = state.part_to_part_gap();
    let size = part.nesting_bounds(gap)?.size();
    let orbiting = Rect::from_minimum_point_and_size(Point::ORIGIN, size)?;
    let orbiting_dots = Raster::sample_shape(&orbiting, engine.pitch());
    if orbiting_dots.is_empty() {
        return None;
    }

    let mut candidates = vec![];

    //the sheet itself
    if let Some(fit) = inner_fit(sheet_bounds, size) {
        let (to_local, to_global) = frame_at(fit.min());
        let obstacles = state
            .nested_parts()
            .map(|(_, np)| np.nesting_bounds.translate(to_local));
        let free = free_dots(fit.translate(to_local), size, obstacles, &orbiting, &orbiting_dots, engine);
        debug!("[SEARCH] sheet: {} free dots", free.len());
        candidates.extend(free.into_dots().into_iter().map(|d| (d + to_global, SafeArea::Sheet)));
    }

    //the holes of nested parts
    for (pk, np) in state.nested_parts() {
        if np.origin == NestedPartOrigin::CutBoundary {
            continue;
        }
        for hole in np.part.inside_loops() {
            let Some(hole_rect) = hole.bounds().and_then(|b| b.offset(-gap / 2.0)) else {
                continue;
            };
            let Some(fit) = inner_fit(hole_rect, size) else {
                continue;
            };
            let hole_obstacle = HoleObstacle {
                hole,
                clearance: gap / 2.0,
            };
            let (to_local, to_global) = frame_at(fit.min());
            let local_fit = fit.translate(to_local);
            let embedded = state
                .embedding()
                .embedded_in(pk)
                .iter()
                .filter_map(|epk| state.nested_part(*epk))
                .map(|enp| enp.nesting_bounds.translate(to_local));

            let fit_dots = Raster::sample(local_fit, engine.pitch());
            let local_obstacle = Anchored {
                shape: &hole_obstacle,
                anchor: fit.min(),
            };
            let hole_forbidden = engine.no_fit_raster(&local_obstacle, &orbiting);
            let in_hole = raster_difference(&fit_dots, &hole_forbidden);
            let free = subtract_obstacles(in_hole, local_fit, size, embedded, &orbiting, &orbiting_dots, engine);
            debug!(
                "[SEARCH] hole of part {}: {} free dots",
                np.part.nesting_id(),
                free.len()
            );
            candidates.extend(free.into_dots().into_iter().map(|d| {
                (
                    d + to_global,
                    SafeArea::Hole {
                        container: pk,
                        hole,
                        hole_rect,
                    },
                )
            }));
        }
    }

    let envelope = state.envelope();
    let ranked = candidates
        .into_iter()
        .map(|(location, area)| {
            let rect = orbiting.translate(Point::ORIGIN.vector_to(location));
            (PlacementCost::new(rect, envelope), rect, location, area)
        })
        .sorted_by(|a, b| a.0.compare(&b.0))
        .collect_vec();

    debug!("[SEARCH] {} candidates for part {}", ranked.len(), part.nesting_id());

    ranked
        .into_iter()
        .find(|(_, rect, _, area)| is_valid(rect, area, state, sheet_bounds))
        .map(|(_, _, location, area)| Placement {
            location,
            embedded_in: match area {
                SafeArea::Sheet => None,
                SafeArea::Hole { container, .. } => Some(container),
            },
        })
}

/// Dots of the inner-fit region `fit` at which the orbiting rectangle collides with none of the `obstacles`
fn free_dots<E: GridEvaluator>(
    fit: Rect,
    size: Vector,
    obstacles: impl Iterator<Item = Rect>,
    orbiting: &Rect,
    orbiting_dots: &Raster,
    engine: &NoFitRasterEngine<E>,
) -> Raster {
    let fit_dots = Raster::sample(fit, engine.pitch());
    subtract_obstacles(fit_dots, fit, size, obstacles, orbiting, orbiting_dots, engine)
}

fn subtract_obstacles<E: GridEvaluator>(
    mut free: Raster,
    fit: Rect,
    size: Vector,
    obstacles: impl Iterator<Item = Rect>,
    orbiting: &Rect,
    orbiting_dots: &Raster,
    engine: &NoFitRasterEngine<E>,
) -> Raster {
    //region that can be touched by the orbiting rectangle when placed within `fit`
    let reach = Rect::new(fit.x_min, fit.y_min, fit.x_max + size.0, fit.y_max + size.1);
    for obstacle in obstacles.filter(|o| o.overlaps(&reach)) {
        if free.is_empty() {
            break;
        }
        let obstacle_dots = Raster::sample_shape(&obstacle, engine.pitch());
        let forbidden =
            engine.no_fit_raster_from_dots(obstacle, *orbiting, &obstacle_dots, orbiting_dots);
        free = raster_difference(&free, &forbidden);
    }
    free
}

/// Exact check of a candidate's nesting bounds against the sheet and all nested parts
fn is_valid(rect: &Rect, area: &SafeArea, state: &NestingState, sheet_bounds: Rect) -> bool {
    match area {
        SafeArea::Sheet => {
            sheet_bounds.contains_rect(rect)
                && state
                    .nested_parts()
                    .all(|(_, np)| !np.nesting_bounds.overlaps(rect))
        }
        SafeArea::Hole {
            container,
            hole,
            hole_rect,
        } => {
            let mut excluded = state.embedding().ancestors_of(*container);
            excluded.push(*container);
            hole_rect.contains_rect(rect)
                && fits_in_hole(rect, hole, state.part_to_part_gap() / 2.0)
                && state
                    .nested_parts()
                    .filter(|(pk, _)| !excluded.contains(pk))
                    .all(|(_, np)| !np.nesting_bounds.overlaps(rect))
        }
    }
}

/// `rect` lies within `hole` and keeps at least `clearance` from its boundary:
/// every corner is inside the hole and no edge of the hole enters `rect` inflated by `clearance`.
fn fits_in_hole(rect: &Rect, hole: &Entity, clearance: f64) -> bool {
    let corners_inside = rect.extents_points().iter().all(|c| {
        let distance = hole.distance_to(c);
        FPA(distance) >= FPA(clearance) && (hole.collides_with(c) || FPA(distance) == FPA(0.0))
    });
    let Some(inflated) = rect.offset(clearance) else {
        return false;
    };
    corners_inside && !hole.edge_iter().any(|e| inflated.collides_with(&e))
}

/// Translations into and out of the frame whose origin lies at `anchor`
fn frame_at(anchor: Point) -> (Vector, Vector) {
    (anchor.vector_to(Point::ORIGIN), Point::ORIGIN.vector_to(anchor))
}
