use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Identifier of an element in the building model
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl Display for ElementId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ElementId {
    fn from(id: u64) -> Self {
        ElementId(id)
    }
}

/// Triangle mesh of a single model element, as delivered by the model geometry provider.
/// Coordinates are in model units.
#[derive(Clone, Debug, Default)]
pub struct RawMesh {
    pub element_id: ElementId,
    /// Type of the element in the source model (e.g. `IfcPlate`)
    pub element_type: String,
    /// Human readable name, if the model provides one
    pub name: Option<String>,
    pub vertices: Vec<[f64; 3]>,
    /// Triangles as indices into `vertices`
    pub triangles: Vec<[usize; 3]>,
    /// Thickness reported by the model's properties, in canonical units (mm)
    pub thickness_hint: Option<f64>,
}

impl RawMesh {
    pub fn new(
        element_id: ElementId,
        element_type: impl Into<String>,
        vertices: Vec<[f64; 3]>,
        triangles: Vec<[usize; 3]>,
    ) -> Self {
        Self {
            element_id,
            element_type: element_type.into(),
            name: None,
            vertices,
            triangles,
            thickness_hint: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_thickness_hint(mut self, thickness: f64) -> Self {
        self.thickness_hint = Some(thickness);
        self
    }

    /// Builds a mesh from the flat coordinate and index buffers most geometry kernels produce.
    /// Trailing values that do not form a complete vertex or triangle are ignored.
    pub fn from_flat_buffers(
        element_id: ElementId,
        element_type: impl Into<String>,
        verts: &[f64],
        faces: &[usize],
    ) -> Self {
        let vertices = verts.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        let triangles = faces.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Self::new(element_id, element_type, vertices, triangles)
    }

    /// Largest absolute coordinate value of the mesh
    pub fn max_abs_coordinate(&self) -> f64 {
        self.vertices
            .iter()
            .flat_map(|v| v.iter())
            .fold(0.0, |acc: f64, c| acc.max(c.abs()))
    }

    /// Minimum and maximum corner of the axis-aligned bounding box, `None` for an empty mesh
    pub fn bounds(&self) -> Option<([f64; 3], [f64; 3])> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(mut min, mut max), v| {
            for i in 0..3 {
                min[i] = min[i].min(v[i]);
                max[i] = max[i].max(v[i]);
            }
            (min, max)
        }))
    }
}
