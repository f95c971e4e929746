use ndarray::Array2;
use rayon::prelude::*;

use crate::util::GridBackend;

/// Evaluates a boolean predicate over every cell `(i, j)` of an `n_rows` x `n_cols` grid.
/// Cells are independent of each other, implementations are free to evaluate them in any order.
/// The call blocks until the complete matrix is available.
pub trait GridEvaluator {
    fn evaluate<F>(&self, n_rows: usize, n_cols: usize, predicate: F) -> Array2<bool>
    where
        F: Fn(usize, usize) -> bool + Sync;
}

/// Evaluates all cells in a plain loop on the calling thread
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialEvaluator;

impl GridEvaluator for SequentialEvaluator {
    fn evaluate<F>(&self, n_rows: usize, n_cols: usize, predicate: F) -> Array2<bool>
    where
        F: Fn(usize, usize) -> bool + Sync,
    {
        Array2::from_shape_fn((n_rows, n_cols), |(i, j)| predicate(i, j))
    }
}

/// Distributes the rows of the grid over the rayon thread pool
#[derive(Clone, Copy, Debug, Default)]
pub struct ParallelEvaluator;

impl GridEvaluator for ParallelEvaluator {
    fn evaluate<F>(&self, n_rows: usize, n_cols: usize, predicate: F) -> Array2<bool>
    where
        F: Fn(usize, usize) -> bool + Sync,
    {
        let rows: Vec<Vec<bool>> = (0..n_rows)
            .into_par_iter()
            .map(|i| (0..n_cols).map(|j| predicate(i, j)).collect())
            .collect();
        Array2::from_shape_fn((n_rows, n_cols), |(i, j)| rows[i][j])
    }
}

impl GridEvaluator for GridBackend {
    fn evaluate<F>(&self, n_rows: usize, n_cols: usize, predicate: F) -> Array2<bool>
    where
        F: Fn(usize, usize) -> bool + Sync,
    {
        match self {
            GridBackend::Sequential => SequentialEvaluator.evaluate(n_rows, n_cols, predicate),
            GridBackend::Parallel => ParallelEvaluator.evaluate(n_rows, n_cols, predicate),
        }
    }
}
