#![doc = document_features::document_features!()]
//! True-shape extraction and shelf nesting of flat steel plates.
//!
//! Plates are extracted from the triangle meshes of a 3D building model, reduced to
//! their 2D outline (including holes) and nested on stock sheets.
//! Utilization is always reported on the real plate area, not on the bounding rectangle.

/// Geometric primitives and base algorithms
pub mod geometry;

/// Entities modelling meshes, plate shapes, stock sheets and placements
pub mod entities;

/// Reduction of 3D plate meshes to 2D plate shapes
pub mod extraction;

/// Shelf nesting of plate shapes on stock sheets
pub mod nesting;

/// External (serde) representations of inputs and results
pub mod io;

/// Helper functions and configuration which do not belong to any specific module
pub mod util;

mod error;

#[doc(inline)]
pub use error::NestError;
#[doc(inline)]
pub use error::Result;
