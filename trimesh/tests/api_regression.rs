//! API regression tests for the trimesh crate family.
//!
//! These tests pin the public surface: the data model, the geometric
//! queries and transforms, and the codec dispatch layer. A failure here
//! after an API change indicates a breaking change.

#![allow(clippy::unwrap_used)]
#![allow(clippy::float_cmp)]

use trimesh::prelude::*;
use trimesh::types::{Point3, Vector3};

// =============================================================================
// Data model
// =============================================================================

mod data_model {
    use super::*;

    #[test]
    fn vertex_creation_and_access() {
        let v = Vertex::from_coords(1.0, 2.0, 3.0);
        assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
        assert!(v.neighbors().is_empty());

        let v2 = Vertex::new(Point3::new(4.0, 5.0, 6.0));
        assert_eq!(v2.position.x, 4.0);
    }

    #[test]
    fn vertex_chaining_mutators() {
        let mut v = Vertex::from_coords(1.0, 1.0, 1.0);
        v.translate(Vector3::new(1.0, 0.0, 0.0)).scale(2.0);
        assert_eq!(v.position, Point3::new(4.0, 2.0, 2.0));
    }

    #[test]
    fn face_invert_involution() {
        let mut face = Face::new(0, 1, 2);
        face.invert();
        assert_eq!(face.indices(), [2, 1, 0]);
        face.invert();
        assert_eq!(face.indices(), [0, 1, 2]);
    }

    #[test]
    fn mesh_construction() {
        let mesh = TriMesh::new();
        assert!(mesh.is_empty());

        let vertices = vec![
            Vertex::from_coords(0.0, 0.0, 0.0),
            Vertex::from_coords(1.0, 0.0, 0.0),
            Vertex::from_coords(0.0, 1.0, 0.0),
        ];
        let faces = vec![Face::new(0, 1, 2)];
        let mesh = TriMesh::from_parts(vertices, faces);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn cube_fixture() {
        let cube = unit_cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 12);

        let adjacency_total: usize = cube.vertices().iter().map(|v| v.neighbors().len()).sum();
        assert_eq!(adjacency_total, 36);
    }

    #[test]
    fn topology_trait_access() {
        let cube = unit_cube();
        assert!(cube.vertex(0).is_some());
        assert!(cube.vertex(8).is_none());
        assert!(cube.face(11).is_some());
        assert!(cube.face(12).is_none());
    }

    #[test]
    fn bounds_trait() {
        let cube = unit_cube();
        let bounds = cube.bounds();
        assert_eq!(bounds.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.max, Point3::new(1.0, 1.0, 1.0));
        assert!(cube.bounds_opt().is_some());
        assert!(TriMesh::new().bounds_opt().is_none());
    }
}

// =============================================================================
// Geometry
// =============================================================================

mod geometry {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn area_of_scaled_cube() {
        let mut cube = unit_cube();
        cube.scale(2.0);
        assert_relative_eq!(cube.area(), 24.0);
    }

    #[test]
    fn closed_mesh_detection() {
        assert!(unit_cube().is_closed());

        let mut open = TriMesh::new();
        open.add_vertex(Vertex::from_coords(0.0, 0.0, 0.0));
        open.add_vertex(Vertex::from_coords(1.0, 0.0, 0.0));
        open.add_vertex(Vertex::from_coords(0.0, 1.0, 0.0));
        open.add_face(Face::new(0, 1, 2));
        assert!(!open.is_closed());
    }

    #[test]
    fn edge_incidence_diagnostics() {
        let cube = unit_cube();
        let incidence = EdgeIncidence::build(cube.faces());
        assert_eq!(incidence.edge_count(), 18);
        assert_eq!(incidence.boundary_edge_count(), 0);
        assert!(incidence.is_manifold());
    }

    #[test]
    fn centering_symmetric_cube() {
        let mut cube = unit_cube();
        cube.scale(2.0).center();

        for vertex in cube.vertices() {
            assert_eq!(vertex.position.x.abs(), 1.0);
            assert_eq!(vertex.position.y.abs(), 1.0);
            assert_eq!(vertex.position.z.abs(), 1.0);
        }
    }

    #[test]
    fn invert_preserves_area_and_closedness() {
        let mut cube = unit_cube();
        let area = cube.area();
        cube.invert();
        assert_eq!(cube.area(), area);
        assert!(cube.is_closed());
    }

    #[test]
    fn subdivision_counts() {
        let mut cube = unit_cube();
        cube.subdivide();
        assert_eq!(cube.face_count(), 48);
        assert_eq!(cube.vertex_count(), 26);
        assert!(cube.is_closed());
    }
}

// =============================================================================
// Codec dispatch
// =============================================================================

mod codecs {
    use super::*;

    #[test]
    fn dispatch_by_extension() {
        assert_eq!(MeshFormat::from_path("a.ply"), Some(MeshFormat::Ply));
        assert_eq!(MeshFormat::from_path("a.stl"), Some(MeshFormat::Stl));
        assert_eq!(MeshFormat::from_path("a.dae"), Some(MeshFormat::Collada));
        assert_eq!(MeshFormat::from_path("a.gltf"), None);
    }

    #[test]
    fn error_messages_are_formatted() {
        let err = load_mesh("").unwrap_err();
        assert_eq!(err.to_string(), "the provided filepath is not valid");

        let err = load_mesh("model.obj").unwrap_err();
        assert!(err.to_string().contains(".obj"));

        let err = load_mesh("missing.ply").unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
        assert!(err
            .to_string()
            .starts_with("the file or directory does not exist"));
    }

    #[test]
    fn full_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let ply = dir.path().join("cube.ply");
        let dae = dir.path().join("cube.dae");

        save_mesh(&unit_cube(), &ply, false).unwrap();

        let mut mesh = load_mesh(&ply).unwrap();
        mesh.scale(2.0).center();
        mesh.subdivide();
        save_mesh(&mesh, &dae, false).unwrap();

        let reloaded = load_mesh(&dae).unwrap();
        assert_eq!(reloaded.vertex_count(), 26);
        assert_eq!(reloaded.face_count(), 48);
        assert!(reloaded.is_closed());
    }
}
