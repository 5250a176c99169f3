#![allow(dead_code)]

use std::sync::Arc;

use itertools::Itertools;

use platenest::entities::{ElementId, PlateShape, RawMesh};
use platenest::extraction::{UnitScale, extract_plate};
use platenest::util::ExtractionConfig;

/// Closed box `w` x `h` x `t` with its lower corner in the origin, outward facing triangles
pub fn box_mesh(id: u64, w: f64, h: f64, t: f64) -> RawMesh {
    let vertices = vec![
        [0.0, 0.0, 0.0],
        [w, 0.0, 0.0],
        [w, h, 0.0],
        [0.0, h, 0.0],
        [0.0, 0.0, t],
        [w, 0.0, t],
        [w, h, t],
        [0.0, h, t],
    ];
    let triangles = vec![
        //bottom
        [0, 2, 1],
        [0, 3, 2],
        //top
        [4, 5, 6],
        [4, 6, 7],
        //sides
        [0, 1, 5],
        [0, 5, 4],
        [1, 2, 6],
        [1, 6, 5],
        [2, 3, 7],
        [2, 7, 6],
        [3, 0, 4],
        [3, 4, 7],
    ];
    RawMesh::new(ElementId(id), "IfcPlate", vertices, triangles)
}

/// Closed `w` x `h` x `t` plate with a rectangular through-hole spanning `hole` = (x_min, y_min, x_max, y_max)
pub fn holed_plate_mesh(id: u64, w: f64, h: f64, t: f64, hole: (f64, f64, f64, f64)) -> RawMesh {
    let (x0, y0, x1, y1) = hole;
    let outline = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)];
    let opening = [(x0, y0), (x1, y0), (x1, y1), (x0, y1)];

    //0..4 outer top, 4..8 hole top, 8..12 outer bottom, 12..16 hole bottom
    let mut vertices = vec![];
    for z in [t, 0.0] {
        for (x, y) in outline.iter().chain(opening.iter()) {
            vertices.push([*x, *y, z]);
        }
    }

    let mut triangles = vec![];
    for k in 0..4 {
        let n = (k + 1) % 4;
        let (o_k, o_n, i_k, i_n) = (k, n, 4 + k, 4 + n);
        //top face
        triangles.push([o_k, o_n, i_n]);
        triangles.push([o_k, i_n, i_k]);
        //bottom face
        triangles.push([o_k + 8, i_n + 8, o_n + 8]);
        triangles.push([o_k + 8, i_k + 8, i_n + 8]);
        //outer wall
        triangles.push([o_k + 8, o_n + 8, o_n]);
        triangles.push([o_k + 8, o_n, o_k]);
        //hole wall
        triangles.push([i_k + 8, i_n, i_n + 8]);
        triangles.push([i_k + 8, i_k, i_n]);
    }
    RawMesh::new(ElementId(id), "IfcPlate", vertices, triangles)
}

/// Flat 50 x 50 grid of 10 mm cells with the centre 30 x 30 block covered by two large triangles
pub fn covered_hole_mesh(id: u64) -> RawMesh {
    let v = |i: usize, j: usize| j * 6 + i;
    let vertices = (0..6)
        .flat_map(|j| (0..6).map(move |i| [i as f64 * 10.0, j as f64 * 10.0, 0.0]))
        .collect();

    let mut triangles = vec![];
    for cj in 0..5 {
        for ci in 0..5 {
            let in_opening = (1..=3).contains(&ci) && (1..=3).contains(&cj);
            if !in_opening {
                triangles.push([v(ci, cj), v(ci + 1, cj), v(ci + 1, cj + 1)]);
                triangles.push([v(ci, cj), v(ci + 1, cj + 1), v(ci, cj + 1)]);
            }
        }
    }
    triangles.push([v(1, 1), v(4, 1), v(4, 4)]);
    triangles.push([v(1, 1), v(4, 4), v(1, 4)]);

    RawMesh::new(ElementId(id), "IfcPlate", vertices, triangles).with_thickness_hint(8.0)
}

/// Flat grid of `nx` x `ny` cells of 10 mm, leaving out the cells in `open`
pub fn grid_mesh(id: u64, nx: usize, ny: usize, open: &[(usize, usize)]) -> RawMesh {
    let v = |i: usize, j: usize| j * (nx + 1) + i;
    let vertices = (0..=ny)
        .flat_map(|j| (0..=nx).map(move |i| [i as f64 * 10.0, j as f64 * 10.0, 0.0]))
        .collect();

    let triangles = (0..ny)
        .cartesian_product(0..nx)
        .filter(|&(cj, ci)| !open.contains(&(ci, cj)))
        .flat_map(|(cj, ci)| {
            [
                [v(ci, cj), v(ci + 1, cj), v(ci + 1, cj + 1)],
                [v(ci, cj), v(ci + 1, cj + 1), v(ci, cj + 1)],
            ]
        })
        .collect();

    RawMesh::new(ElementId(id), "IfcPlate", vertices, triangles).with_thickness_hint(6.0)
}

/// Two flat 10 x 10 squares touching in a single corner
pub fn pinched_mesh(id: u64) -> RawMesh {
    let vertices = vec![
        [0.0, 0.0, 0.0],
        [10.0, 0.0, 0.0],
        [10.0, 10.0, 0.0],
        [0.0, 10.0, 0.0],
        [20.0, 10.0, 0.0],
        [20.0, 20.0, 0.0],
        [10.0, 20.0, 0.0],
    ];
    let triangles = vec![[0, 1, 2], [0, 2, 3], [2, 4, 5], [2, 5, 6]];
    RawMesh::new(ElementId(id), "IfcPlate", vertices, triangles).with_thickness_hint(5.0)
}

pub fn mm() -> UnitScale {
    UnitScale::Fixed(1.0)
}

pub fn rect_shape(id: u64, w: f64, h: f64, t: f64) -> Arc<PlateShape> {
    Arc::new(extract_plate(&box_mesh(id, w, h, t), &mm(), &ExtractionConfig::default()).unwrap())
}

pub fn holed_shape(id: u64, w: f64, h: f64, t: f64, hole: (f64, f64, f64, f64)) -> Arc<PlateShape> {
    let mesh = holed_plate_mesh(id, w, h, t, hole);
    Arc::new(extract_plate(&mesh, &mm(), &ExtractionConfig::default()).unwrap())
}
