use serde::{Deserialize, Serialize};

use crate::geometry::geo_enums::Axis;
use crate::geometry::primitives::Point;

/// Projection of model space onto the plane of a plate, obtained by dropping its thickness axis.
///
/// Holds everything needed to map 2D plate coordinates (canonical units) back into the
/// plate's local 3D plane (model units).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneProjection {
    /// The axis that was dropped (plate normal)
    pub dropped_axis: Axis,
    /// Minimum corner of the mesh's bounding box, in model units
    pub origin: [f64; 3],
    /// Factor converting model units into canonical units (mm)
    pub unit_scale: f64,
}

impl PlaneProjection {
    pub fn new(dropped_axis: Axis, origin: [f64; 3]) -> Self {
        Self {
            dropped_axis,
            origin,
            unit_scale: 1.0,
        }
    }

    pub fn with_unit_scale(mut self, unit_scale: f64) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    /// Projects a vertex in model units onto the plane, relative to the origin, keeping model units.
    pub fn project(&self, v: [f64; 3]) -> Point {
        let [u, w] = self.dropped_axis.plane_axes();
        Point(
            v[u.index()] - self.origin[u.index()],
            v[w.index()] - self.origin[w.index()],
        )
    }

    /// Maps a point in canonical 2D plate coordinates back into model space.
    /// The dropped coordinate is set to the origin of the plate (its lowest face).
    pub fn unproject(&self, p: Point) -> [f64; 3] {
        let [u, w] = self.dropped_axis.plane_axes();
        let mut v = self.origin;
        v[u.index()] += p.0 / self.unit_scale;
        v[w.index()] += p.1 / self.unit_scale;
        v
    }
}
