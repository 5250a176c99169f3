use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::entities::ElementId;
use crate::geometry::geo_traits::Transformable;
use crate::geometry::primitives::{Rect, Ring};
use crate::geometry::{PlacementTransform, PlaneProjection};
use crate::io::svg_path;

/// How a [`PlateShape`] was obtained from its mesh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeOrigin {
    /// Outline and holes extracted from the mesh
    Extracted,
    /// Holes were dropped because they left no positive net area
    ExteriorOnly,
    /// No closed boundary could be traced, the outline is the convex hull of the projected mesh
    ConvexHull,
    /// Extraction failed, the shape is the projected bounding rectangle
    BoundingBoxFallback { reason: String },
}

impl Display for ShapeOrigin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeOrigin::Extracted => write!(f, "extracted"),
            ShapeOrigin::ExteriorOnly => write!(f, "exterior only"),
            ShapeOrigin::ConvexHull => write!(f, "convex hull"),
            ShapeOrigin::BoundingBoxFallback { reason } => {
                write!(f, "bounding box fallback ({reason})")
            }
        }
    }
}

/// The true 2D shape of a plate, in canonical units (mm).
///
/// The outer ring and additional exterior fragments are counterclockwise, holes are clockwise.
/// Immutable once built, see [`PlateShape::build`].
#[derive(Clone, Debug)]
pub struct PlateShape {
    element_id: ElementId,
    element_type: String,
    name: Option<String>,
    outer: Ring,
    holes: Vec<Ring>,
    /// Disjoint exterior fragments besides `outer` (multi-island plates)
    islands: Vec<Ring>,
    net_area: f64,
    bbox: Rect,
    thickness: f64,
    projection: PlaneProjection,
    origin: ShapeOrigin,
}

impl PlateShape {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        element_id: ElementId,
        element_type: String,
        name: Option<String>,
        outer: Ring,
        holes: Vec<Ring>,
        islands: Vec<Ring>,
        net_area: f64,
        bbox: Rect,
        thickness: f64,
        projection: PlaneProjection,
        origin: ShapeOrigin,
    ) -> Self {
        Self {
            element_id,
            element_type,
            name,
            outer,
            holes,
            islands,
            net_area,
            bbox,
            thickness,
            projection,
            origin,
        }
    }

    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    /// Name of the element, falls back to `Plate_<id>`
    pub fn name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Plate_{}", self.element_id.0))
    }

    pub fn outer(&self) -> &Ring {
        &self.outer
    }

    pub fn holes(&self) -> &[Ring] {
        &self.holes
    }

    pub fn islands(&self) -> &[Ring] {
        &self.islands
    }

    /// The outer ring followed by all additional exterior fragments
    pub fn exteriors(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.outer).chain(self.islands.iter())
    }

    /// Exterior area minus the area of all holes
    pub fn net_area(&self) -> f64 {
        self.net_area
    }

    pub fn outer_area(&self) -> f64 {
        self.outer.area()
    }

    pub fn hole_area(&self) -> f64 {
        self.holes.iter().map(Ring::area).sum()
    }

    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    pub fn width(&self) -> f64 {
        self.bbox.width()
    }

    pub fn height(&self) -> f64 {
        self.bbox.height()
    }

    pub fn bbox_area(&self) -> f64 {
        self.bbox.area()
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Inverse projection, mapping plate coordinates back into the model
    pub fn projection(&self) -> &PlaneProjection {
        &self.projection
    }

    pub fn origin(&self) -> &ShapeOrigin {
        &self.origin
    }

    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, ShapeOrigin::BoundingBoxFallback { .. })
    }

    /// All rings of the shape (exteriors, then holes) mapped onto a sheet by `transform`
    pub fn placed_rings(&self, transform: &PlacementTransform) -> Vec<Ring> {
        self.exteriors()
            .chain(self.holes.iter())
            .map(|r| r.transform_clone(transform))
            .collect()
    }

    /// SVG-style path description (`M .. L .. z` per ring) of the shape in its own coordinates
    pub fn path_description(&self) -> String {
        svg_path::shape_path_string(self, None)
    }
}
