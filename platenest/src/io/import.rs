use crate::entities::{ElementId, RawMesh, StockSize};
use crate::extraction::UnitScale;
use crate::io::ext_repr::{ExtInstance, ExtMesh, ExtStockSize};
use crate::util::NestConfig;

pub fn import_mesh(ext_mesh: &ExtMesh) -> RawMesh {
    RawMesh {
        element_id: ElementId(ext_mesh.id),
        element_type: ext_mesh.element_type.clone(),
        name: ext_mesh.name.clone(),
        vertices: ext_mesh.vertices.clone(),
        triangles: ext_mesh.faces.clone(),
        thickness_hint: ext_mesh.thickness,
    }
}

pub fn import_stock_size(ext_stock: &ExtStockSize) -> StockSize {
    StockSize::new(ext_stock.width, ext_stock.height)
}

/// Fixed scale if the instance specifies one, detection per mesh otherwise
pub fn import_unit_scale(ext_instance: &ExtInstance) -> UnitScale {
    match ext_instance.unit_scale {
        Some(scale) => UnitScale::Fixed(scale),
        None => UnitScale::default(),
    }
}

/// Meshes of the instance together with their quantities
pub fn import_meshes(ext_instance: &ExtInstance) -> Vec<(RawMesh, usize)> {
    ext_instance
        .meshes
        .iter()
        .map(|m| (import_mesh(m), m.quantity))
        .collect()
}

/// Nesting configuration for the instance's stock sizes.
/// Not validated here, see [`NestConfig::validate`].
pub fn import_nest_config(ext_instance: &ExtInstance, kerf: f64, allow_rotation: bool) -> NestConfig {
    NestConfig::new(
        ext_instance.stock_sizes.iter().map(import_stock_size).collect(),
        kerf,
        allow_rotation,
    )
}
