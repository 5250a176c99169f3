mod nest_item;
mod placed_plate;
mod plate_shape;
mod raw_mesh;
mod sheet;
mod stock;

#[doc(inline)]
pub use nest_item::NestItem;
#[doc(inline)]
pub use placed_plate::PlacedPlate;
#[doc(inline)]
pub use plate_shape::PlateShape;
#[doc(inline)]
pub use plate_shape::ShapeOrigin;
#[doc(inline)]
pub use raw_mesh::ElementId;
#[doc(inline)]
pub use raw_mesh::RawMesh;
#[doc(inline)]
pub use sheet::Sheet;
#[doc(inline)]
pub use stock::StockSize;
