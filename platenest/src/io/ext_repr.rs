use serde::{Deserialize, Serialize};

use crate::entities::ShapeOrigin;
use crate::geometry::PlaneProjection;

/// External representation of a [`RawMesh`](crate::entities::RawMesh), together with the number of copies to cut.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtMesh {
    /// Identifier of the element in the building model
    pub id: u64,
    #[serde(default)]
    pub element_type: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    /// Vertices in model units
    pub vertices: Vec<[f64; 3]>,
    /// Triangles as indices into `vertices`
    pub faces: Vec<[usize; 3]>,
    /// Thickness from the model's properties, in mm.
    /// Measured from the mesh if not specified
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thickness: Option<f64>,
    #[serde(default = "default_quantity")]
    pub quantity: usize,
}

fn default_quantity() -> usize {
    1
}

/// External representation of a [`StockSize`](crate::entities::StockSize), in mm.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExtStockSize {
    pub width: f64,
    pub height: f64,
}

/// A set of plate meshes to be nested on candidate stock sizes.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtInstance {
    pub name: String,
    pub meshes: Vec<ExtMesh>,
    pub stock_sizes: Vec<ExtStockSize>,
    /// Factor converting model units into mm.
    /// Detected per mesh if not specified
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub unit_scale: Option<f64>,
}

/// Closed ring of points, the closing edge is implicit
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtRing(pub Vec<(f64, f64)>);

/// External representation of a [`PlateShape`](crate::entities::PlateShape), in mm.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlateShape {
    pub id: u64,
    pub name: String,
    pub element_type: String,
    pub thickness: f64,
    pub width: f64,
    pub height: f64,
    /// Counterclockwise outer boundary
    pub outer: ExtRing,
    /// Clockwise holes
    #[serde(default)]
    pub holes: Vec<ExtRing>,
    /// Additional counterclockwise exterior fragments
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub islands: Vec<ExtRing>,
    pub net_area: f64,
    /// SVG path description of all rings
    pub path: String,
    /// Mapping back into the plane of the plate in the model
    pub projection: PlaneProjection,
    pub origin: ShapeOrigin,
}

/// External representation of a [`PlacedPlate`](crate::entities::PlacedPlate).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlacedPlate {
    pub id: u64,
    pub instance: usize,
    pub name: String,
    /// Lower-left corner of the placed bounding box
    pub x: f64,
    pub y: f64,
    /// Counterclockwise rotation in degrees (0 or 90)
    pub rotation: u16,
    /// Dimensions of the placed (rotated) bounding box
    pub width: f64,
    pub height: f64,
    pub net_area: f64,
    /// SVG path description of the plate in sheet coordinates
    pub path: String,
}

/// External representation of a [`Sheet`](crate::entities::Sheet).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSheet {
    pub index: usize,
    pub stock_index: usize,
    pub width: f64,
    pub height: f64,
    pub placed_area: f64,
    /// Placed net area as a percentage of the sheet area
    pub utilization: f64,
    pub placements: Vec<ExtPlacedPlate>,
}

/// External representation of an [`Unplaceable`](crate::nesting::Unplaceable) plate.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtUnplaceable {
    pub id: u64,
    pub instance: usize,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub reason: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtStockUsage {
    pub width: f64,
    pub height: f64,
    pub count: usize,
}

/// External representation of [`NestingStatistics`](crate::nesting::NestingStatistics).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtStatistics {
    pub sheets_used: usize,
    pub nested_plates: usize,
    pub unnested_plates: usize,
    pub total_stock_area_m2: f64,
    pub total_used_area_m2: f64,
    pub waste_area_m2: f64,
    pub utilization: f64,
    pub waste_percentage: f64,
    pub plates_tonnage: f64,
    pub waste_tonnage: f64,
    pub sheets_per_stock: Vec<ExtStockUsage>,
}

/// External representation of a [`NestingResult`](crate::nesting::NestingResult).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtNestingResult {
    /// Thickness shared by all plates of this result, if nested per thickness
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thickness: Option<f64>,
    pub kerf: f64,
    pub sheets: Vec<ExtSheet>,
    pub unplaceable: Vec<ExtUnplaceable>,
    pub statistics: ExtStatistics,
}
