use std::f64::consts::PI;

use crate::geometry::geo_traits::{Bounded, CollidesWith, DistanceTo, Transformable};
use crate::geometry::primitives::{Edge, Point, Rect, Vector};
use crate::geometry::{Transformation, calculate_area, normalize_angle};
use crate::util::assertions;

/// A closed loop of boundary points, either the outside of a part or one of its holes.
///
/// The bounds are cached and recomputed on every transformation,
/// the points and bounds are therefore private.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub layer: String,
    /// Identity of the loop, the outside loop's id identifies the whole part
    pub nesting_id: u64,
    pub nesting_key: String,
    /// Accumulated rotation in degrees within [0, 360), if tracked
    rotation: Option<f64>,
    extents_points: Vec<Point>,
    bounds: Option<Rect>,
    circle: Option<CircleMeta>,
}

/// Metadata kept for loops which were sampled from a circle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleMeta {
    pub center: Point,
    pub diameter: f64,
}

impl Entity {
    /// Loops with fewer than 2 points have no bounds.
    pub fn new(extents_points: Vec<Point>) -> Self {
        let bounds = Self::calculate_bounds(&extents_points);
        Entity {
            layer: String::new(),
            nesting_id: 0,
            nesting_key: String::new(),
            rotation: None,
            extents_points,
            bounds,
            circle: None,
        }
    }

    /// Samples a circle into a regular polygon of `n_segments` vertices.
    /// The polygon circumscribes the circle so that the sampled loop never lies within the true one.
    pub fn circle(center: Point, diameter: f64, n_segments: usize) -> Self {
        let n_segments = n_segments.max(3);
        let radius = diameter / 2.0 / (PI / n_segments as f64).cos();
        let points = (0..n_segments)
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / n_segments as f64;
                center + Vector(angle.cos(), angle.sin()) * radius
            })
            .collect();
        Entity {
            circle: Some(CircleMeta { center, diameter }),
            ..Entity::new(points)
        }
    }

    pub fn with_layer(self, layer: impl Into<String>) -> Self {
        Entity {
            layer: layer.into(),
            ..self
        }
    }

    pub fn with_nesting_meta_data(
        self,
        nesting_id: u64,
        nesting_key: impl Into<String>,
        rotation: Option<f64>,
    ) -> Self {
        Entity {
            nesting_id,
            nesting_key: nesting_key.into(),
            rotation: rotation.map(normalize_angle),
            ..self
        }
    }

    pub fn extents_points(&self) -> &[Point] {
        &self.extents_points
    }

    pub fn rotation(&self) -> Option<f64> {
        self.rotation
    }

    pub fn circle_meta(&self) -> Option<&CircleMeta> {
        self.circle.as_ref()
    }

    pub fn n_points(&self) -> usize {
        self.extents_points.len()
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.n_points();
        (0..n).map(move |i| Edge::new(self.extents_points[i], self.extents_points[(i + 1) % n]))
    }

    /// Unsigned area enclosed by the loop
    pub fn area(&self) -> f64 {
        calculate_area(&self.extents_points).abs()
    }

    pub fn translate(&mut self, v: Vector) -> &mut Self {
        self.transform(&Transformation::from_translation((v.0, v.1)))
    }

    /// Rotates the loop about the origin, `degrees` counterclockwise.
    pub fn rotate(&mut self, degrees: f64) -> &mut Self {
        self.transform(&Transformation::from_rotation(degrees.to_radians()))
    }

    /// Point on the boundary of the loop closest to `p`.
    pub fn closest_point_to(&self, p: Point) -> Option<Point> {
        self.edge_iter()
            .map(|e| e.closest_point_to(p))
            .min_by(|a, b| a.sq_distance(p).total_cmp(&b.sq_distance(p)))
    }

    fn calculate_bounds(points: &[Point]) -> Option<Rect> {
        match points.len() {
            0 | 1 => None,
            _ => Rect::from_points(points),
        }
    }
}

impl Bounded for Entity {
    fn bounds(&self) -> Option<Rect> {
        self.bounds
    }
}

impl Transformable for Entity {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        //destructuring pattern to ensure that the code is updated when the struct changes
        let Entity {
            layer: _,
            nesting_id: _,
            nesting_key: _,
            rotation,
            extents_points,
            bounds,
            circle,
        } = self;

        extents_points.iter_mut().for_each(|p| {
            p.transform(t);
        });

        if let Some(circle) = circle.as_mut() {
            circle.center.transform(t);
        }

        if let Some(rotation) = rotation.as_mut() {
            *rotation = normalize_angle(*rotation + t.rotation().to_degrees());
        }

        //regenerate bounds
        *bounds = Entity::calculate_bounds(extents_points);

        debug_assert!(assertions::bounds_match_points(self));

        self
    }
}

/// Crossing number test, see <https://en.wikipedia.org/wiki/Point_in_polygon#Ray_casting_algorithm>.
/// An edge counts when it straddles the horizontal through the point with its lower end inclusive,
/// so points on the left and bottom boundaries are inside and points on the right and top boundaries are not.
/// Two loops sharing an edge never both enclose a point on it.
impl CollidesWith<Point> for Entity {
    fn collides_with(&self, p: &Point) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if p.0 < bounds.x_min || p.0 > bounds.x_max || p.1 < bounds.y_min || p.1 > bounds.y_max {
            return false;
        }
        let points = &self.extents_points;
        let mut inside = false;
        let mut j = points.len() - 1;
        for i in 0..points.len() {
            let (pi, pj) = (points[i], points[j]);
            if (pi.1 > p.1) != (pj.1 > p.1) {
                let x_intersect = (pj.0 - pi.0) * (p.1 - pi.1) / (pj.1 - pi.1) + pi.0;
                if p.0 < x_intersect {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

impl DistanceTo<Point> for Entity {
    /// Distance from `point` to the boundary of the loop, infinite for loops without edges.
    fn distance_to(&self, point: &Point) -> f64 {
        self.sq_distance_to(point).sqrt()
    }

    fn sq_distance_to(&self, point: &Point) -> f64 {
        self.edge_iter()
            .map(|e| e.sq_distance_to(point))
            .fold(f64::INFINITY, f64::min)
    }
}
