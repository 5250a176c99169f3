use log::{debug, warn};
use ordered_float::OrderedFloat;

use crate::entities::RawMesh;
use crate::geometry::PlaneProjection;
use crate::geometry::convex_hull::convex_hull_area;
use crate::geometry::geo_enums::Axis;
use crate::geometry::primitives::Point;
use crate::util::ExtractionConfig;
use crate::{NestError, Result};

/// A mesh flattened onto the plane of its plate, still in model units.
#[derive(Clone, Debug)]
pub struct Projection {
    /// Projected vertices, relative to the bounding box origin, same indexing as the mesh
    pub points: Vec<Point>,
    /// Triangles of the mesh, as indices into `points`
    pub triangles: Vec<[usize; 3]>,
    /// Bounding box extents of the mesh along X, Y and Z
    pub extents: [f64; 3],
    pub plane: PlaneProjection,
}

impl Projection {
    /// Extent of the mesh along the dropped axis
    pub fn thickness(&self) -> f64 {
        self.extents[self.plane.dropped_axis.index()]
    }
}

/// Reduces a 3D mesh to 2D by dropping its thickness axis.
///
/// The thickness axis is the one with the smallest bounding box extent (lowest axis on ties).
/// For (nearly) isotropic meshes, the axis whose projection has the largest convex hull is used instead.
pub fn project(mesh: &RawMesh, config: &ExtractionConfig) -> Result<Projection> {
    let element_id = mesh.element_id;
    let (min, max) = mesh
        .bounds()
        .ok_or_else(|| NestError::extraction(element_id, "mesh has no vertices"))?;

    if min.iter().chain(max.iter()).any(|c| !c.is_finite()) {
        return Err(NestError::extraction(
            element_id,
            "mesh contains non-finite coordinates",
        ));
    }

    let extents = [max[0] - min[0], max[1] - min[1], max[2] - min[2]];
    let max_extent = extents.iter().copied().fold(0.0, f64::max);
    let min_extent = extents.iter().copied().fold(f64::INFINITY, f64::min);

    if max_extent <= 0.0 {
        return Err(NestError::extraction(
            element_id,
            "all mesh vertices coincide",
        ));
    }

    let thinnest = Axis::ALL
        .into_iter()
        .min_by_key(|a| OrderedFloat(extents[a.index()]))
        .unwrap_or(Axis::Z);

    let dropped_axis = match max_extent - min_extent <= config.isotropy_tolerance * max_extent {
        false => thinnest,
        true => {
            //no clear thickness axis: pick the view showing the largest surface
            let mut best = (thinnest, f64::NEG_INFINITY);
            for axis in Axis::ALL {
                let plane = PlaneProjection::new(axis, min);
                let points = mesh.vertices.iter().map(|v| plane.project(*v)).collect();
                let hull_area = convex_hull_area(points);
                debug!("[EXTRACT] element {element_id}: dropping {axis} gives hull area {hull_area:.3}");
                if hull_area > best.1 {
                    best = (axis, hull_area);
                }
            }
            best.0
        }
    };

    let plane = PlaneProjection::new(dropped_axis, min);
    let points: Vec<Point> = mesh.vertices.iter().map(|v| plane.project(*v)).collect();

    let n_vertices = points.len();
    let triangles: Vec<[usize; 3]> = mesh
        .triangles
        .iter()
        .filter(|t| t.iter().all(|&i| i < n_vertices))
        .copied()
        .collect();

    if triangles.len() < mesh.triangles.len() {
        warn!(
            "[EXTRACT] element {element_id}: dropped {} triangles with out-of-range vertex indices",
            mesh.triangles.len() - triangles.len()
        );
    }

    debug!(
        "[EXTRACT] element {element_id} dims: X={:.3}, Y={:.3}, Z={:.3}, thickness axis={dropped_axis}",
        extents[0], extents[1], extents[2]
    );

    Ok(Projection {
        points,
        triangles,
        extents,
        plane,
    })
}
