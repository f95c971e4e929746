use std::collections::HashSet;

use itertools::Itertools;

use crate::geometry::geo_traits::{Bounded, CollidesWith};
use crate::geometry::primitives::{Point, Rect};

/// Tolerance (in multiples of the pitch) used when rounding coordinates onto the lattice
const LATTICE_EPS: f64 = 1e-6;

/// Samples `bounds` with dots spaced `pitch` apart.
///
/// Rows are walked from the top (`y_max`) down to `y_min`, alternating left-to-right and right-to-left.
/// Every row contains its start corner and each following step of exactly `pitch`
/// up to, but not beyond, the end corner. The remaining partial gap to the end corner is not filled.
pub fn generate_grid(bounds: Rect, pitch: f64) -> Vec<Point> {
    debug_assert!(pitch > 0.0);
    let n_rows = (bounds.height() / pitch + LATTICE_EPS).floor() as usize + 1;
    let n_cols = (bounds.width() / pitch + LATTICE_EPS).floor() as usize + 1;

    let mut dots = Vec::with_capacity(n_rows * n_cols);
    for row in 0..n_rows {
        let y = bounds.y_max - row as f64 * pitch;
        let (start, direction) = match row % 2 {
            0 => (bounds.x_min, 1.0),
            _ => (bounds.x_max, -1.0),
        };
        dots.extend((0..n_cols).map(|k| Point(start + direction * k as f64 * pitch, y)));
    }
    dots
}

/// Expands `rect` to the smallest rectangle with corners on the lattice of `pitch`.
pub fn snap_outward(rect: Rect, pitch: f64) -> Rect {
    let lo = |v: f64| (v / pitch + LATTICE_EPS).floor() * pitch;
    let hi = |v: f64| (v / pitch - LATTICE_EPS).ceil() * pitch;
    Rect::new(lo(rect.x_min), lo(rect.y_min), hi(rect.x_max), hi(rect.y_max))
}

/// Shrinks `rect` to the largest rectangle with corners on the lattice of `pitch`.
/// None if no lattice point lies within `rect`.
pub fn snap_inward(rect: Rect, pitch: f64) -> Option<Rect> {
    let lo = |v: f64| (v / pitch - LATTICE_EPS).ceil() * pitch;
    let hi = |v: f64| (v / pitch + LATTICE_EPS).floor() * pitch;
    let (x_min, y_min, x_max, y_max) = (lo(rect.x_min), lo(rect.y_min), hi(rect.x_max), hi(rect.y_max));
    (x_min <= x_max && y_min <= y_max).then(|| Rect::new(x_min, y_min, x_max, y_max))
}

/// Integer coordinates of a dot on the lattice of a given pitch.
/// Dots are compared through their keys, never through their float coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatticeKey(pub i64, pub i64);

impl LatticeKey {
    pub fn new(p: Point, pitch: f64) -> Self {
        LatticeKey((p.0 / pitch).round() as i64, (p.1 / pitch).round() as i64)
    }
}

impl std::ops::Add for LatticeKey {
    type Output = LatticeKey;

    fn add(self, other: LatticeKey) -> LatticeKey {
        LatticeKey(self.0 + other.0, self.1 + other.1)
    }
}

impl std::ops::Sub for LatticeKey {
    type Output = LatticeKey;

    fn sub(self, other: LatticeKey) -> LatticeKey {
        LatticeKey(self.0 - other.0, self.1 - other.1)
    }
}

/// A set of dots on the global lattice of multiples of `pitch`.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    pitch: f64,
    dots: Vec<Point>,
}

impl Raster {
    pub fn empty(pitch: f64) -> Self {
        Raster {
            pitch,
            dots: vec![],
        }
    }

    /// Dots on the lattice lying within `bounds` (edges included).
    /// Empty if the bounds are too small to contain a single one.
    pub fn sample(bounds: Rect, pitch: f64) -> Self {
        match snap_inward(bounds, pitch) {
            Some(snapped) => Raster {
                pitch,
                dots: generate_grid(snapped, pitch),
            },
            None => Raster::empty(pitch),
        }
    }

    /// Dots on the lattice which collide with `shape`.
    /// Empty for shapes without bounds.
    pub fn sample_shape<S>(shape: &S, pitch: f64) -> Self
    where
        S: Bounded + CollidesWith<Point>,
    {
        let Some(bounds) = shape.bounds() else {
            return Raster::empty(pitch);
        };
        let dots = generate_grid(snap_outward(bounds, pitch), pitch)
            .into_iter()
            .filter(|d| shape.collides_with(d))
            .collect_vec();
        Raster { pitch, dots }
    }

    pub fn from_dots(dots: Vec<Point>, pitch: f64) -> Self {
        Raster { pitch, dots }
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn dots(&self) -> &[Point] {
        &self.dots
    }

    pub fn into_dots(self) -> Vec<Point> {
        self.dots
    }

    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = LatticeKey> + '_ {
        self.dots.iter().map(|d| LatticeKey::new(*d, self.pitch))
    }

    /// Componentwise minimum of all dots
    pub fn min_point(&self) -> Option<Point> {
        self.dots
            .iter()
            .copied()
            .reduce(|a, b| Point(a.0.min(b.0), a.1.min(b.1)))
    }
}

/// Dots of `a` that do not coincide with any dot of `b`, in the order of `a`.
pub fn raster_difference(a: &Raster, b: &Raster) -> Raster {
    debug_assert!(b.is_empty() || a.pitch == b.pitch);
    if b.is_empty() {
        return a.clone();
    }
    let occupied: HashSet<LatticeKey> = b.keys().collect();
    let dots = a
        .dots
        .iter()
        .filter(|d| !occupied.contains(&LatticeKey::new(**d, a.pitch)))
        .copied()
        .collect_vec();
    Raster {
        pitch: a.pitch,
        dots,
    }
}
