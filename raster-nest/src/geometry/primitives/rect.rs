use anyhow::{Result, ensure};

use crate::geometry::geo_traits::{Bounded, CollidesWith};
use crate::geometry::primitives::{Edge, Point, Vector};
use crate::util::FPA;

///Axis-aligned rectangle, used for bounds throughout.
///Zero width or height is allowed, a loop of two points has such bounds.
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        debug_assert!(
            x_min <= x_max && y_min <= y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    pub fn try_new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self> {
        ensure!(
            x_min <= x_max && y_min <= y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Tight bounds of a set of points, `None` if the set is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| match acc {
            None => Some(Rect::new(p.0, p.1, p.0, p.1)),
            Some(r) => Some(Rect::new(
                r.x_min.min(p.0),
                r.y_min.min(p.1),
                r.x_max.max(p.0),
                r.y_max.max(p.1),
            )),
        })
    }

    pub fn from_minimum_point_and_size(min: Point, size: Vector) -> Option<Self> {
        let max = min + size;
        (size.0 >= 0.0 && size.1 >= 0.0).then(|| Rect::new(min.0, min.1, max.0, max.1))
    }

    pub fn min(&self) -> Point {
        Point(self.x_min, self.y_min)
    }

    pub fn max(&self) -> Point {
        Point(self.x_max, self.y_max)
    }

    pub fn size(&self) -> Vector {
        self.min().vector_to(self.max())
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns a rectangle expanded by `delta` on every side (shrunk for a negative `delta`).
    /// If shrinking would invert the rectangle, returns None.
    pub fn offset(&self, delta: f64) -> Option<Self> {
        let (x_min, y_min) = (self.x_min - delta, self.y_min - delta);
        let (x_max, y_max) = (self.x_max + delta, self.y_max + delta);
        (x_min <= x_max && y_min <= y_max).then(|| Rect::new(x_min, y_min, x_max, y_max))
    }

    pub fn translate(&self, v: Vector) -> Self {
        Rect::new(
            self.x_min + v.0,
            self.y_min + v.1,
            self.x_max + v.0,
            self.y_max + v.1,
        )
    }

    /// The four corners, counterclockwise starting from the minimum corner.
    pub fn extents_points(&self) -> [Point; 4] {
        [
            Point(self.x_min, self.y_min),
            Point(self.x_max, self.y_min),
            Point(self.x_max, self.y_max),
            Point(self.x_min, self.y_max),
        ]
    }

    /// Returns the smallest rectangle that contains both `a` and `b`.
    pub fn bounding_rect(a: Rect, b: Rect) -> Rect {
        Rect::new(
            f64::min(a.x_min, b.x_min),
            f64::min(a.y_min, b.y_min),
            f64::max(a.x_max, b.x_max),
            f64::max(a.y_max, b.y_max),
        )
    }

    /// True if the interiors of both rectangles intersect.
    /// Rectangles which only share (part of) an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        FPA(f64::max(self.x_min, other.x_min)) < FPA(f64::min(self.x_max, other.x_max))
            && FPA(f64::max(self.y_min, other.y_min)) < FPA(f64::min(self.y_max, other.y_max))
    }

    /// True if `other` lies within `self`, boundaries included.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        FPA(self.x_min) <= FPA(other.x_min)
            && FPA(self.y_min) <= FPA(other.y_min)
            && FPA(self.x_max) >= FPA(other.x_max)
            && FPA(self.y_max) >= FPA(other.y_max)
    }
}

/// Half-open containment: the minimum edges are part of the rectangle, the maximum edges are not.
/// Two rectangles sharing an edge never both contain a point on it.
/// Points within [`FPA`] tolerance of an edge are treated as lying on it.
impl CollidesWith<Point> for Rect {
    #[inline(always)]
    fn collides_with(&self, point: &Point) -> bool {
        let (x, y) = (FPA(point.0), FPA(point.1));
        x >= FPA(self.x_min) && x < FPA(self.x_max) && y >= FPA(self.y_min) && y < FPA(self.y_max)
    }
}

/// An edge collides with a rectangle when it passes through its interior.
/// Edges which only touch the boundary do not collide.
impl CollidesWith<Edge> for Rect {
    fn collides_with(&self, edge: &Edge) -> bool {
        //Liang-Barsky: clip the edge to the closed rectangle
        let d = edge.start.vector_to(edge.end);
        let (mut t_min, mut t_max) = (0.0_f64, 1.0_f64);
        let constraints = [
            (-d.0, edge.start.0 - self.x_min),
            (d.0, self.x_max - edge.start.0),
            (-d.1, edge.start.1 - self.y_min),
            (d.1, self.y_max - edge.start.1),
        ];
        for (p, q) in constraints {
            if p == 0.0 {
                if q < 0.0 {
                    return false;
                }
            } else if p < 0.0 {
                t_min = t_min.max(q / p);
            } else {
                t_max = t_max.min(q / p);
            }
        }
        if t_min > t_max {
            return false;
        }
        //the clipped part enters the interior if and only if its midpoint does
        let mid = edge.start + d * (0.5 * (t_min + t_max));
        let (x, y) = (FPA(mid.0), FPA(mid.1));
        x > FPA(self.x_min) && x < FPA(self.x_max) && y > FPA(self.y_min) && y < FPA(self.y_max)
    }
}

impl Bounded for Rect {
    fn bounds(&self) -> Option<Rect> {
        Some(*self)
    }
}
