/// Recovery of exterior and hole rings from a projected triangle soup
pub mod boundary;
/// Priority-ordered detection of the model's length unit
pub mod unit_scale;

mod builder;
mod projector;
mod session;

#[doc(inline)]
pub use builder::ExtractionOutcome;
#[doc(inline)]
pub use builder::extract_plate;
#[doc(inline)]
pub use builder::extract_plates;
#[doc(inline)]
pub use projector::Projection;
#[doc(inline)]
pub use projector::project;
#[doc(inline)]
pub use session::ExtractionSession;
#[doc(inline)]
pub use unit_scale::UnitScale;
