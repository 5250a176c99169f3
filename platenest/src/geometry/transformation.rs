use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::geometry::geo_enums::Rotation;
use crate::geometry::primitives::{Point, Rect};

/// Maps the local coordinates of a plate shape onto a sheet.
///
/// The local bounding box of the shape is first moved to the origin, then rotated
/// counterclockwise by [`Rotation`] (keeping the rotated box in the positive quadrant),
/// and finally translated so that its lower-left corner lands on `position`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementTransform {
    /// Bounding box of the shape in its own coordinates
    pub source_bbox: Rect,
    pub rotation: Rotation,
    /// Lower-left corner of the placed bounding box on the sheet
    pub position: Point,
}

impl PlacementTransform {
    pub fn new(source_bbox: Rect, rotation: Rotation, position: Point) -> Self {
        Self {
            source_bbox,
            rotation,
            position,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        let lx = p.0 - self.source_bbox.x_min;
        let ly = p.1 - self.source_bbox.y_min;
        let (rx, ry) = match self.rotation {
            Rotation::Deg0 => (lx, ly),
            Rotation::Deg90 => (self.source_bbox.height() - ly, lx),
        };
        Point(rx + self.position.0, ry + self.position.1)
    }

    /// Bounding box occupied on the sheet
    pub fn placed_bbox(&self) -> Rect {
        let (w, h) = self
            .rotation
            .apply_to_dims(self.source_bbox.width(), self.source_bbox.height());
        Rect {
            x_min: self.position.0,
            y_min: self.position.1,
            x_max: self.position.0 + w,
            y_max: self.position.1 + h,
        }
    }
}

impl Display for PlacementTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "r: {}, t: ({:.3}, {:.3})",
            self.rotation, self.position.0, self.position.1
        )
    }
}
