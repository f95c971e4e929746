use crate::geometry::geo_traits::DistanceTo;
use crate::geometry::primitives::Point;

/// Geometric primitive representing a line segment
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    pub fn new(start: Point, end: Point) -> Self {
        Edge { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Point on the segment closest to `p`. A zero-length edge returns its start.
    pub fn closest_point_to(&self, p: Point) -> Point {
        let Some(direction) = self.start.vector_to(self.end).normalize() else {
            return self.start;
        };
        let projection = self
            .start
            .vector_to(p)
            .dot(direction)
            .clamp(0.0, self.length());
        self.start + direction * projection
    }
}

impl DistanceTo<Point> for Edge {
    fn distance_to(&self, point: &Point) -> f64 {
        self.sq_distance_to(point).sqrt()
    }

    fn sq_distance_to(&self, point: &Point) -> f64 {
        self.closest_point_to(*point).sq_distance(*point)
    }
}
