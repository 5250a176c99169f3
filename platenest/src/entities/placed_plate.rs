use std::sync::Arc;

use crate::entities::{ElementId, PlateShape};
use crate::geometry::PlacementTransform;
use crate::geometry::geo_enums::Rotation;
use crate::geometry::primitives::{Point, Rect, Ring};
use crate::io::svg_path;

/// A copy of a plate placed on a sheet.
#[derive(Clone, Debug)]
pub struct PlacedPlate {
    pub element_id: ElementId,
    /// Which copy of the plate this is, `0..quantity`
    pub instance: usize,
    pub shape: Arc<PlateShape>,
    pub sheet_index: usize,
    pub transform: PlacementTransform,
}

impl PlacedPlate {
    pub fn new(
        shape: Arc<PlateShape>,
        instance: usize,
        sheet_index: usize,
        rotation: Rotation,
        position: Point,
    ) -> Self {
        let transform = PlacementTransform::new(shape.bbox(), rotation, position);
        Self {
            element_id: shape.element_id(),
            instance,
            shape,
            sheet_index,
            transform,
        }
    }

    /// Lower-left corner of the placed bounding box on the sheet
    pub fn position(&self) -> Point {
        self.transform.position
    }

    pub fn rotation(&self) -> Rotation {
        self.transform.rotation
    }

    /// Bounding box occupied on the sheet
    pub fn bbox(&self) -> Rect {
        self.transform.placed_bbox()
    }

    pub fn net_area(&self) -> f64 {
        self.shape.net_area()
    }

    /// Rings of the plate in sheet coordinates
    pub fn rings(&self) -> Vec<Ring> {
        self.shape.placed_rings(&self.transform)
    }

    /// SVG-style path description of the plate in sheet coordinates
    pub fn path_description(&self) -> String {
        svg_path::shape_path_string(&self.shape, Some(&self.transform))
    }
}
