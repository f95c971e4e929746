use std::collections::HashSet;

use itertools::Itertools;
use log::trace;
use ndarray::Axis;

use crate::geometry::geo_traits::{Bounded, CollidesWith};
use crate::geometry::primitives::{Point, Rect};
use crate::raster::{GridEvaluator, LatticeKey, Raster, generate_grid, snap_outward};

/// Approximates no-fit polygons on a dot lattice.
///
/// For a stationary and an orbiting shape, the engine determines which translations of the orbiting shape
/// make it overlap the stationary one. Both shapes are sampled on the lattice of the configured pitch,
/// a translation is forbidden when any dot of the translated orbiting shape coincides with a stationary dot.
/// The expensive part, a dense test over all (board dot, stationary dot) pairs, is delegated to a [`GridEvaluator`].
#[derive(Clone, Debug)]
pub struct NoFitRasterEngine<E: GridEvaluator> {
    pitch: f64,
    evaluator: E,
}

impl<E: GridEvaluator> NoFitRasterEngine<E> {
    pub fn new(pitch: f64, evaluator: E) -> Self {
        debug_assert!(pitch > 0.0);
        NoFitRasterEngine { pitch, evaluator }
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Returns the forbidden translations: every board dot `b` at which the orbiting shape,
    /// with the minimum corner of its dots moved to `b`, has a dot in common with the stationary shape.
    /// Shapes without bounds or without any dot yield an empty raster.
    pub fn no_fit_raster<S, O>(&self, stationary: &S, orbiting: &O) -> Raster
    where
        S: Bounded + CollidesWith<Point>,
        O: Bounded + CollidesWith<Point>,
    {
        let (Some(s_bounds), Some(o_bounds)) = (stationary.bounds(), orbiting.bounds()) else {
            return Raster::empty(self.pitch);
        };
        let stationary_dots = Raster::sample_shape(stationary, self.pitch);
        let orbiting_dots = Raster::sample_shape(orbiting, self.pitch);
        self.no_fit_raster_from_dots(s_bounds, o_bounds, &stationary_dots, &orbiting_dots)
    }

    /// [`NoFitRasterEngine::no_fit_raster`] for shapes that have already been sampled.
    pub fn no_fit_raster_from_dots(
        &self,
        stationary_bounds: Rect,
        orbiting_bounds: Rect,
        stationary_dots: &Raster,
        orbiting_dots: &Raster,
    ) -> Raster {
        let Some(orbiting_min) = orbiting_dots.min_point() else {
            return Raster::empty(self.pitch);
        };
        if stationary_dots.is_empty() {
            return Raster::empty(self.pitch);
        }

        let board = Rect::new(
            stationary_bounds.x_min - orbiting_bounds.width(),
            stationary_bounds.y_min - orbiting_bounds.height(),
            stationary_bounds.x_max,
            stationary_bounds.y_max,
        );
        let board_dots = generate_grid(snap_outward(board, self.pitch), self.pitch);

        let board_keys = board_dots
            .iter()
            .map(|b| LatticeKey::new(*b, self.pitch))
            .collect_vec();
        let stationary_keys = stationary_dots.keys().collect_vec();
        let orbiting_keys: HashSet<LatticeKey> = orbiting_dots.keys().collect();
        let orbiting_min = LatticeKey::new(orbiting_min, self.pitch);

        // o + b == s + orbiting_min
        let coincidence = self.evaluator.evaluate(
            board_keys.len(),
            stationary_keys.len(),
            |i, j| orbiting_keys.contains(&(stationary_keys[j] + orbiting_min - board_keys[i])),
        );

        let forbidden = board_dots
            .into_iter()
            .zip(coincidence.axis_iter(Axis(0)))
            .filter(|(_, row)| row.iter().any(|&c| c))
            .map(|(b, _)| b)
            .collect_vec();

        trace!(
            "[NFR] board: {}, stationary: {}, orbiting: {}, forbidden: {}",
            board_keys.len(),
            stationary_keys.len(),
            orbiting_keys.len(),
            forbidden.len()
        );

        Raster::from_dots(forbidden, self.pitch)
    }
}
