use std::ops::{Add, Mul, Sub};

use crate::geometry::Transformation;
use crate::geometry::geo_traits::Transformable;

/// Geometric primitive representing a point
#[derive(Debug, Clone, PartialEq, Copy, Default)]
pub struct Point(pub f64, pub f64);

/// Displacement between two [`Point`]s
#[derive(Debug, Clone, PartialEq, Copy, Default)]
pub struct Vector(pub f64, pub f64);

impl Point {
    pub const ORIGIN: Point = Point(0.0, 0.0);

    pub fn vector_to(&self, other: Point) -> Vector {
        Vector(other.0 - self.0, other.1 - self.1)
    }

    pub fn distance(&self, other: Point) -> f64 {
        self.sq_distance(other).sqrt()
    }

    pub fn sq_distance(&self, other: Point) -> f64 {
        (self.0 - other.0).powi(2) + (self.1 - other.1).powi(2)
    }
}

impl Vector {
    pub fn length(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    pub fn dot(&self, other: Vector) -> f64 {
        self.0 * other.0 + self.1 * other.1
    }

    /// Unit vector with the same direction, `None` for the zero vector.
    pub fn normalize(&self) -> Option<Vector> {
        let length = self.length();
        match length > 0.0 && length.is_finite() {
            true => Some(Vector(self.0 / length, self.1 / length)),
            false => None,
        }
    }

    pub fn scale(&self, factor: f64) -> Vector {
        Vector(self.0 * factor, self.1 * factor)
    }
}

impl Transformable for Point {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        let (tx, ty) = t.apply((self.0, self.1));
        self.0 = tx;
        self.1 = ty;
        self
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, v: Vector) -> Point {
        Point(self.0 + v.0, self.1 + v.1)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;
    fn sub(self, v: Vector) -> Point {
        Point(self.0 - v.0, self.1 - v.1)
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, other: Vector) -> Vector {
        Vector(self.0 + other.0, self.1 + other.1)
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, other: Vector) -> Vector {
        Vector(self.0 - other.0, self.1 - other.1)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, factor: f64) -> Vector {
        self.scale(factor)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}

impl From<(f64, f64)> for Point {
    fn from(p: (f64, f64)) -> Self {
        Point(p.0, p.1)
    }
}
