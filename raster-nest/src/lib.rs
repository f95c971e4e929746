#![doc = document_features::document_features!()]
//! Raster based no-fit-polygon engine and greedy sheet nesting for 2D parts with holes.

/// Geometric primitives, traits and shape modification
pub mod geometry;

/// Entities modelling parts, sheets and the state of a nesting pass
pub mod entities;

/// Dot grid sampling and the no-fit raster engine
pub mod raster;

/// Index of parts nested inside the bounds of other parts
pub mod embedding;

/// Placement search and the nesting pass driver
pub mod nest;

/// Importing instances into and exporting results out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
