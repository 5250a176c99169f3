pub mod convex_hull;
pub mod geo_enums;
pub mod geo_traits;
pub mod primitives;

mod plane_projection;
mod transformation;

#[doc(inline)]
pub use plane_projection::PlaneProjection;
#[doc(inline)]
pub use transformation::PlacementTransform;
