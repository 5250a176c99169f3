use log::{debug, info, warn};

use crate::entities::{PlateShape, RawMesh, ShapeOrigin};
use crate::extraction::boundary::{BoundaryRings, extract_rings};
use crate::extraction::projector::{Projection, project};
use crate::extraction::unit_scale::UnitScale;
use crate::geometry::PlaneProjection;
use crate::geometry::geo_enums::Axis;
use crate::geometry::primitives::{Rect, Ring};
use crate::util::{ExtractionConfig, assertions};
use crate::{NestError, Result};

impl PlateShape {
    /// Turns the boundary rings of a projected mesh into a plate shape in millimetres.
    ///
    /// Holes that leave no positive net area are dropped. If the exterior alone has no area either,
    /// extraction fails for this element.
    pub fn build(
        mesh: &RawMesh,
        projection: &Projection,
        rings: BoundaryRings,
        unit_scale: f64,
    ) -> Result<PlateShape> {
        let element_id = mesh.element_id;
        let outer = rings.exterior.scale(unit_scale);
        let islands = rings.islands.iter().map(|r| r.scale(unit_scale)).collect::<Vec<_>>();
        let mut holes = rings.holes.iter().map(|r| r.scale(unit_scale)).collect::<Vec<_>>();

        let exterior_area = outer.area() + islands.iter().map(Ring::area).sum::<f64>();
        let hole_area = holes.iter().map(Ring::area).sum::<f64>();

        let mut origin = match rings.used_fallback {
            true => ShapeOrigin::ConvexHull,
            false => ShapeOrigin::Extracted,
        };
        let mut net_area = exterior_area - hole_area;

        if net_area <= 0.0 && !holes.is_empty() {
            warn!(
                "[EXTRACT] element {element_id}: holes ({hole_area:.3}) cover the exterior ({exterior_area:.3}), ignoring them"
            );
            holes.clear();
            net_area = exterior_area;
            origin = ShapeOrigin::ExteriorOnly;
        }
        if net_area <= 0.0 {
            return Err(NestError::extraction(
                element_id,
                "extracted shape has no positive area",
            ));
        }

        let bbox = Rect::from_points(
            std::iter::once(&outer)
                .chain(islands.iter())
                .flat_map(|r| r.points.iter()),
        )
        .ok_or_else(|| NestError::extraction(element_id, "extracted shape has no finite bounds"))?;

        let thickness = mesh
            .thickness_hint
            .unwrap_or(projection.thickness() * unit_scale);

        Ok(PlateShape::new(
            element_id,
            mesh.element_type.clone(),
            mesh.name.clone(),
            outer,
            holes,
            islands,
            net_area,
            bbox,
            thickness,
            projection.plane.with_unit_scale(unit_scale),
            origin,
        ))
    }

    /// Rectangle spanning the projected bounding box of the mesh, without holes.
    /// Used in place of plates whose extraction failed; the rectangle may have zero size.
    pub fn bounding_box_fallback(
        mesh: &RawMesh,
        config: &ExtractionConfig,
        unit_scale: f64,
        reason: impl Into<String>,
    ) -> PlateShape {
        let (plane, bbox, thickness) = match project(mesh, config) {
            Ok(projection) => {
                let bbox = Rect::from_points(&projection.points).unwrap_or(ZERO_RECT);
                (projection.plane, bbox, projection.thickness())
            }
            Err(_) => {
                let finite_bounds = mesh
                    .bounds()
                    .filter(|(min, max)| min.iter().chain(max.iter()).all(|c| c.is_finite()));
                let (origin, thickness) = match finite_bounds {
                    Some((min, max)) => (min, max[2] - min[2]),
                    None => ([0.0; 3], 0.0),
                };
                (PlaneProjection::new(Axis::Z, origin), ZERO_RECT, thickness)
            }
        };

        let bbox = bbox.scale(unit_scale);
        let outer = Ring::new(bbox.corners().to_vec());
        let net_area = bbox.area();

        PlateShape::new(
            mesh.element_id,
            mesh.element_type.clone(),
            mesh.name.clone(),
            outer,
            vec![],
            vec![],
            net_area,
            bbox,
            mesh.thickness_hint.unwrap_or(thickness * unit_scale),
            plane.with_unit_scale(unit_scale),
            ShapeOrigin::BoundingBoxFallback {
                reason: reason.into(),
            },
        )
    }
}

const ZERO_RECT: Rect = Rect {
    x_min: 0.0,
    y_min: 0.0,
    x_max: 0.0,
    y_max: 0.0,
};

/// Projects a single mesh, traces its boundary and builds its plate shape.
pub fn extract_plate(
    mesh: &RawMesh,
    unit_scale: &UnitScale,
    config: &ExtractionConfig,
) -> Result<PlateShape> {
    unit_scale.validate()?;
    config.validate()?;
    let scale = unit_scale.resolve(mesh);
    let projection = project(mesh, config)?;
    let rings = extract_rings(&projection.points, &projection.triangles, config);
    let shape = PlateShape::build(mesh, &projection, rings, scale)?;
    debug_assert!(assertions::shape_areas_consistent(&shape));
    debug!(
        "[EXTRACT] element {}: {:.1}x{:.1}x{:.1} mm, {} holes, net area {:.1} mm² ({})",
        shape.element_id(),
        shape.width(),
        shape.height(),
        shape.thickness(),
        shape.holes().len(),
        shape.net_area(),
        shape.origin()
    );
    Ok(shape)
}

/// Result of extracting one mesh of a batch.
#[derive(Clone, Debug)]
pub struct ExtractionOutcome {
    pub shape: PlateShape,
    /// The error that caused `shape` to be a bounding box fallback
    pub failure: Option<NestError>,
}

/// Extracts every mesh of a batch. A failing mesh is replaced by its bounding box
/// and never affects the others. Only an invalid unit scale or configuration aborts the batch.
pub fn extract_plates(
    meshes: &[RawMesh],
    unit_scale: &UnitScale,
    config: &ExtractionConfig,
) -> Result<Vec<ExtractionOutcome>> {
    unit_scale.validate()?;
    config.validate()?;
    let outcomes: Vec<ExtractionOutcome> = meshes
        .iter()
        .map(|mesh| match extract_plate(mesh, unit_scale, config) {
            Ok(shape) => ExtractionOutcome {
                shape,
                failure: None,
            },
            Err(err) => {
                warn!("[EXTRACT] {err}, falling back to the bounding box");
                let scale = unit_scale.resolve(mesh);
                ExtractionOutcome {
                    shape: PlateShape::bounding_box_fallback(mesh, config, scale, err.to_string()),
                    failure: Some(err),
                }
            }
        })
        .collect();

    let n_failed = outcomes.iter().filter(|o| o.failure.is_some()).count();
    info!(
        "[EXTRACT] extracted {} plates ({} with holes, {} fallbacks)",
        outcomes.len(),
        outcomes.iter().filter(|o| o.shape.has_holes()).count(),
        n_failed
    );
    Ok(outcomes)
}
