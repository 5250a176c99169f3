mod common;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use float_cmp::approx_eq;
    use test_case::test_case;

    use platenest::NestError;
    use platenest::entities::{ElementId, PlateShape, RawMesh, ShapeOrigin};
    use platenest::extraction::boundary::BoundaryRings;
    use platenest::extraction::{ExtractionSession, UnitScale, extract_plate, extract_plates, project};
    use platenest::geometry::geo_enums::{Axis, Winding};
    use platenest::geometry::primitives::{Point, Ring};
    use platenest::util::{ExtractionConfig, assertions};

    use crate::common::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn rectangle_with_centered_hole() {
        init_logger();
        let mesh = holed_plate_mesh(1, 200.0, 100.0, 10.0, (75.0, 25.0, 125.0, 75.0));
        let shape = extract_plate(&mesh, &mm(), &ExtractionConfig::default()).unwrap();

        assert_eq!(shape.outer().n_points(), 4);
        assert_eq!(shape.holes().len(), 1);
        assert_eq!(shape.holes()[0].n_points(), 4);
        assert!(shape.islands().is_empty());
        assert_eq!(shape.origin(), &ShapeOrigin::Extracted);

        assert!(approx_eq!(f64, shape.outer_area(), 20_000.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, shape.hole_area(), 2_500.0, epsilon = 1e-6));
        assert!(approx_eq!(
            f64,
            shape.net_area(),
            shape.outer_area() - shape.hole_area(),
            epsilon = 1e-6
        ));
        assert!(approx_eq!(f64, shape.thickness(), 10.0, epsilon = 1e-9));

        assert_eq!(shape.outer().winding(), Winding::CounterClockwise);
        assert_eq!(shape.holes()[0].winding(), Winding::Clockwise);
        assert!(assertions::shape_areas_consistent(&shape));
    }

    #[test_case(1000.0, 10.0, 500.0, Axis::Y, 500.0, 1000.0; "thin along y")]
    #[test_case(8.0, 400.0, 300.0, Axis::X, 400.0, 300.0; "thin along x")]
    #[test_case(600.0, 250.0, 12.0, Axis::Z, 600.0, 250.0; "thin along z")]
    fn thinnest_axis_is_dropped(x: f64, y: f64, z: f64, axis: Axis, width: f64, height: f64) {
        let mesh = box_mesh(1, x, y, z).with_name("web plate");
        let projection = project(&mesh, &ExtractionConfig::default()).unwrap();
        assert_eq!(projection.plane.dropped_axis, axis);

        let shape = extract_plate(&mesh, &mm(), &ExtractionConfig::default()).unwrap();
        assert!(approx_eq!(f64, shape.width(), width, epsilon = 1e-9));
        assert!(approx_eq!(f64, shape.height(), height, epsilon = 1e-9));
        assert!(approx_eq!(f64, shape.net_area(), width * height, epsilon = 1e-6));
        assert_eq!(shape.name(), "web plate");
    }

    #[test]
    fn isotropic_mesh_ties_to_lowest_axis() {
        let mesh = box_mesh(1, 100.0, 100.0, 100.0);
        let projection = project(&mesh, &ExtractionConfig::default()).unwrap();
        assert_eq!(projection.plane.dropped_axis, Axis::X);
    }

    #[test]
    fn isotropic_mesh_uses_largest_surface() {
        //a flat 100 x 98 square lifted by a single vertex 99 high: nearly isotropic extents
        let vertices = vec![
            [0.0, 0.0, 0.0],
            [100.0, 0.0, 0.0],
            [100.0, 98.0, 0.0],
            [0.0, 98.0, 0.0],
            [50.0, 49.0, 99.0],
        ];
        let triangles = vec![[0, 1, 2], [0, 2, 3], [0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]];
        let mesh = RawMesh::new(ElementId(1), "IfcPlate", vertices, triangles);
        let projection = project(&mesh, &ExtractionConfig::default()).unwrap();
        assert_eq!(projection.plane.dropped_axis, Axis::Z);
    }

    #[test]
    fn metres_are_detected_and_scaled() {
        let mesh = box_mesh(1, 2.0, 1.0, 0.01);
        let shape = extract_plate(&mesh, &UnitScale::default(), &ExtractionConfig::default()).unwrap();
        assert!(approx_eq!(f64, shape.width(), 2000.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, shape.height(), 1000.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, shape.thickness(), 10.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, shape.projection().unit_scale, 1000.0, epsilon = 1e-12));
    }

    #[test]
    fn thickness_hint_takes_precedence() {
        let mesh = box_mesh(1, 500.0, 300.0, 9.7).with_thickness_hint(10.0);
        let shape = extract_plate(&mesh, &mm(), &ExtractionConfig::default()).unwrap();
        assert_eq!(shape.thickness(), 10.0);
    }

    #[test]
    fn inverse_projection_maps_back_into_the_model() {
        let mut mesh = box_mesh(1, 10.0, 400.0, 300.0);
        mesh.vertices.iter_mut().for_each(|v| {
            v[0] += 50.0;
            v[1] += 20.0;
            v[2] += 5.0;
        });
        let shape = extract_plate(&mesh, &mm(), &ExtractionConfig::default()).unwrap();
        let v = shape.projection().unproject(Point(400.0, 300.0));
        assert_eq!(v, [50.0, 420.0, 305.0]);
    }

    #[test_case(Some(1.5), 1; "gap triangles removed")]
    #[test_case(Some(25.0), 0; "threshold too large")]
    fn gap_triangles_become_holes(alpha: Option<f64>, n_holes: usize) {
        init_logger();
        let config = ExtractionConfig {
            alpha,
            ..ExtractionConfig::default()
        };
        let shape = extract_plate(&covered_hole_mesh(1), &mm(), &config).unwrap();
        assert_eq!(shape.holes().len(), n_holes);
        if n_holes == 1 {
            assert_eq!(shape.outer().n_points(), 4);
            assert_eq!(shape.holes()[0].n_points(), 4);
            assert!(approx_eq!(f64, shape.net_area(), 1600.0, epsilon = 1e-6));
        }
    }

    #[test]
    fn gap_removal_is_skipped_when_gaps_dominate() {
        //the two bridging triangles cover 36% of the surface
        let config = ExtractionConfig {
            alpha: Some(1.5),
            max_gap_area_ratio: 0.3,
            ..ExtractionConfig::default()
        };
        let shape = extract_plate(&covered_hole_mesh(1), &mm(), &config).unwrap();
        assert!(shape.holes().is_empty());
        assert!(approx_eq!(f64, shape.net_area(), 2500.0, epsilon = 1e-6));
    }

    #[test]
    fn plate_with_several_holes() {
        let mesh = grid_mesh(1, 7, 3, &[(1, 1), (5, 1)]);
        let shape = extract_plate(&mesh, &mm(), &ExtractionConfig::default()).unwrap();

        assert_eq!(shape.outer().n_points(), 4);
        assert_eq!(shape.holes().len(), 2);
        assert!(shape.holes().iter().all(|h| h.winding() == Winding::Clockwise));
        assert!(approx_eq!(f64, shape.outer_area(), 2100.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, shape.hole_area(), 200.0, epsilon = 1e-6));
        assert!(shape.outer_area() >= shape.hole_area());
        assert!(approx_eq!(f64, shape.net_area(), 1900.0, epsilon = 1e-6));
        assert!(assertions::shape_areas_consistent(&shape));
    }

    #[test]
    fn small_detached_ring_is_noise() {
        //100 x 100 plate with a stray 0.5 mm² triangle next to it
        let vertices = vec![
            [0.0, 0.0, 0.0],
            [100.0, 0.0, 0.0],
            [100.0, 100.0, 0.0],
            [0.0, 100.0, 0.0],
            [200.0, 0.0, 0.0],
            [201.0, 0.0, 0.0],
            [200.0, 1.0, 0.0],
        ];
        let triangles = vec![[0, 1, 2], [0, 2, 3], [4, 5, 6]];
        let mesh = RawMesh::new(ElementId(1), "IfcPlate", vertices, triangles).with_thickness_hint(5.0);
        let shape = extract_plate(&mesh, &mm(), &ExtractionConfig::default()).unwrap();

        assert!(shape.islands().is_empty());
        assert!(shape.holes().is_empty());
        assert!(approx_eq!(f64, shape.net_area(), 10_000.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, shape.width(), 100.0, epsilon = 1e-9));
    }

    #[test]
    fn holes_covering_the_exterior_are_ignored() {
        let mesh = box_mesh(1, 10.0, 10.0, 1.0);
        let projection = project(&mesh, &ExtractionConfig::default()).unwrap();
        let square = |size: f64| {
            Ring::new(vec![
                Point(0.0, 0.0),
                Point(size, 0.0),
                Point(size, size),
                Point(0.0, size),
            ])
        };
        let rings = BoundaryRings {
            exterior: square(10.0),
            holes: vec![square(10.0).with_winding(Winding::Clockwise)],
            islands: vec![],
            used_fallback: false,
        };
        let shape = PlateShape::build(&mesh, &projection, rings, 1.0).unwrap();

        assert_eq!(shape.origin(), &ShapeOrigin::ExteriorOnly);
        assert!(shape.holes().is_empty());
        assert!(approx_eq!(f64, shape.net_area(), 100.0, epsilon = 1e-9));
    }

    #[test_case(ExtractionConfig { alpha: Some(-1.0), ..ExtractionConfig::default() }; "negative alpha")]
    #[test_case(ExtractionConfig { alpha: Some(f64::NAN), ..ExtractionConfig::default() }; "nan alpha")]
    #[test_case(ExtractionConfig { max_gap_area_ratio: -0.1, ..ExtractionConfig::default() }; "negative gap ratio")]
    #[test_case(ExtractionConfig { noise_area_ratio: -0.1, ..ExtractionConfig::default() }; "negative noise ratio")]
    #[test_case(ExtractionConfig { isotropy_tolerance: f64::NAN, ..ExtractionConfig::default() }; "nan isotropy tolerance")]
    #[test_case(ExtractionConfig { weld_tolerance: f64::INFINITY, ..ExtractionConfig::default() }; "infinite weld tolerance")]
    #[test_case(ExtractionConfig { min_triangle_area_ratio: -1.0, ..ExtractionConfig::default() }; "negative triangle area ratio")]
    fn invalid_extraction_config_is_rejected(config: ExtractionConfig) {
        assert!(matches!(config.validate(), Err(NestError::Configuration(_))));

        let mesh = box_mesh(1, 500.0, 300.0, 10.0);
        let single = extract_plate(&mesh, &mm(), &config);
        assert!(matches!(single, Err(NestError::Configuration(_))));
        let batch = extract_plates(&[mesh], &mm(), &config);
        assert!(matches!(batch, Err(NestError::Configuration(_))));
        assert!(matches!(
            ExtractionSession::new(config, mm()),
            Err(NestError::Configuration(_))
        ));
    }

    #[test]
    fn default_extraction_config_is_valid() {
        assert!(ExtractionConfig::default().validate().is_ok());
        let no_gaps = ExtractionConfig {
            alpha: None,
            ..ExtractionConfig::default()
        };
        assert!(no_gaps.validate().is_ok());
    }

    #[test]
    fn touching_regions_are_separated() {
        let shape = extract_plate(&pinched_mesh(1), &mm(), &ExtractionConfig::default()).unwrap();
        assert_eq!(shape.outer().n_points(), 4);
        assert_eq!(shape.islands().len(), 1);
        assert!(shape.holes().is_empty());
        assert!(approx_eq!(f64, shape.net_area(), 200.0, epsilon = 1e-9));
        assert_eq!(shape.exteriors().count(), 2);
    }

    #[test]
    fn mesh_from_flat_buffers() {
        let verts = [0.0, 0.0, 0.0, 300.0, 0.0, 0.0, 300.0, 200.0, 0.0, 0.0, 200.0, 0.0, 1.0];
        let faces = [0, 1, 2, 0, 2, 3, 1];
        let mesh = RawMesh::from_flat_buffers(ElementId(4), "IfcPlate", &verts, &faces).with_thickness_hint(12.0);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangles.len(), 2);

        let shape = extract_plate(&mesh, &mm(), &ExtractionConfig::default()).unwrap();
        assert!(approx_eq!(f64, shape.net_area(), 60_000.0, epsilon = 1e-6));
        assert_eq!(shape.thickness(), 12.0);
    }

    #[test]
    fn coincident_vertices_fail_extraction() {
        let mesh = RawMesh::new(
            ElementId(7),
            "IfcPlate",
            vec![[1.0, 1.0, 1.0]; 3],
            vec![[0, 1, 2]],
        );
        let err = extract_plate(&mesh, &mm(), &ExtractionConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            NestError::GeometryExtraction {
                element_id: ElementId(7),
                ..
            }
        ));
    }

    #[test]
    fn empty_mesh_fails_extraction() {
        let mesh = RawMesh::new(ElementId(3), "IfcPlate", vec![], vec![]);
        assert!(extract_plate(&mesh, &mm(), &ExtractionConfig::default()).is_err());
    }

    #[test]
    fn batch_continues_after_failure() {
        init_logger();
        let meshes = vec![
            RawMesh::new(ElementId(1), "IfcPlate", vec![[1.0, 1.0, 1.0]; 3], vec![[0, 1, 2]]),
            box_mesh(2, 500.0, 300.0, 10.0),
        ];
        let outcomes = extract_plates(&meshes, &mm(), &ExtractionConfig::default()).unwrap();
        assert_eq!(outcomes.len(), 2);

        assert!(outcomes[0].failure.is_some());
        assert!(outcomes[0].shape.is_fallback());
        assert!(outcomes[0].shape.holes().is_empty());
        assert!(outcomes[0].shape.net_area() >= 0.0);

        assert!(outcomes[1].failure.is_none());
        assert!(!outcomes[1].shape.is_fallback());
        assert!(approx_eq!(f64, outcomes[1].shape.net_area(), 150_000.0, epsilon = 1e-6));
    }

    #[test]
    fn boundary_less_mesh_uses_convex_hull() {
        //only side walls: every triangle projects onto a line
        let mesh = box_mesh(1, 400.0, 200.0, 10.0);
        let side_walls = RawMesh::new(
            ElementId(1),
            "IfcPlate",
            mesh.vertices.clone(),
            mesh.triangles[4..].to_vec(),
        );
        let shape = extract_plate(&side_walls, &mm(), &ExtractionConfig::default()).unwrap();
        assert_eq!(shape.origin(), &ShapeOrigin::ConvexHull);
        assert!(approx_eq!(f64, shape.net_area(), 80_000.0, epsilon = 1e-6));
    }

    #[test]
    fn invalid_unit_scale_is_rejected() {
        let mesh = box_mesh(1, 500.0, 300.0, 10.0);
        let result = extract_plate(&mesh, &UnitScale::Fixed(-1.0), &ExtractionConfig::default());
        assert!(matches!(result, Err(NestError::Configuration(_))));
    }

    #[test]
    fn path_description_covers_all_rings() {
        let shape = holed_shape(1, 200.0, 100.0, 10.0, (75.0, 25.0, 125.0, 75.0));
        let path = shape.path_description();
        assert!(path.starts_with('M'));
        assert_eq!(path.matches(['M', 'm']).count(), 2);
        assert_eq!(path.matches(['Z', 'z']).count(), 2);
    }

    #[test]
    fn default_name_uses_element_id() {
        let shape = rect_shape(42, 500.0, 300.0, 10.0);
        assert_eq!(shape.name(), "Plate_42");
    }

    #[test]
    fn session_reuses_extracted_shapes() {
        let mut session = ExtractionSession::new(ExtractionConfig::default(), mm()).unwrap();
        let mesh = box_mesh(5, 500.0, 300.0, 10.0);

        let first = session.extract(&mesh);
        let second = session.extract(&mesh);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(session.len(), 1);
        assert_eq!(session.n_cache_hits(), 1);
        assert!(session.get(ElementId(5)).is_some());

        session.clear();
        assert!(session.is_empty());
    }
}
