/// Candidate plans over one or more stock sizes
pub mod plan;
/// Row based packing of a single stock size
pub mod shelf;

mod engine;
mod grouping;
mod result;

#[doc(inline)]
pub use engine::NestingEngine;
#[doc(inline)]
pub use engine::nest;
#[doc(inline)]
pub use engine::placement_order;
#[doc(inline)]
pub use grouping::ThicknessGroup;
#[doc(inline)]
pub use grouping::nest_by_thickness;
#[doc(inline)]
pub use grouping::{THICKNESS_STEPS_PER_MM, thickness_key};
#[doc(inline)]
pub use result::NestingResult;
#[doc(inline)]
pub use result::NestingStatistics;
#[doc(inline)]
pub use result::StockUsage;
#[doc(inline)]
pub use result::Unplaceable;
#[doc(inline)]
pub use result::{DEFAULT_WASTE_THICKNESS, STEEL_DENSITY};
