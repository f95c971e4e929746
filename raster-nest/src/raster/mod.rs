mod evaluator;
mod grid;
mod nfp;

#[doc(inline)]
pub use evaluator::GridEvaluator;
#[doc(inline)]
pub use evaluator::ParallelEvaluator;
#[doc(inline)]
pub use evaluator::SequentialEvaluator;
#[doc(inline)]
pub use grid::LatticeKey;
#[doc(inline)]
pub use grid::Raster;
#[doc(inline)]
pub use grid::generate_grid;
#[doc(inline)]
pub use grid::raster_difference;
#[doc(inline)]
pub use grid::snap_inward;
#[doc(inline)]
pub use grid::snap_outward;
#[doc(inline)]
pub use nfp::NoFitRasterEngine;
