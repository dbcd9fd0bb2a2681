//! One-step subdivision refinement.

#![allow(clippy::cast_precision_loss)]

use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::adjacency::normalize_edge;
use crate::{Face, TriMesh, Vertex};

/// Build the refined mesh for one subdivision step.
///
/// Original vertices are replaced by smoothed positions blended from their
/// recorded neighbors; each canonical edge gains one midpoint vertex shared
/// by both incident faces; each face is replaced by three corner triangles
/// and one center triangle. Adjacency is rebuilt face by face.
pub(crate) fn subdivide(mesh: &TriMesh) -> TriMesh {
    let vertex_count = mesh.vertices().len();
    let face_count = mesh.faces().len();

    let mut refined = TriMesh::with_capacity(vertex_count + face_count * 3 / 2, face_count * 4);

    for vertex in mesh.vertices() {
        refined.add_vertex(Vertex::new(smoothed_position(vertex, mesh.vertices())));
    }

    // First pass: one midpoint per canonical edge, shared by both incident
    // faces.
    let mut edge_midpoints: HashMap<(u32, u32), u32> = HashMap::new();
    for face in mesh.faces() {
        let [v1, v2, v3] = face.indices();
        for (a, b) in [(v1, v2), (v1, v3), (v2, v3)] {
            let edge = normalize_edge(a, b);
            if !edge_midpoints.contains_key(&edge) {
                let pa = mesh.vertices()[a as usize].position;
                let pb = mesh.vertices()[b as usize].position;
                let midpoint = Point3::from((pa.coords + pb.coords) * 0.5);
                let index = refined.add_vertex(Vertex::new(midpoint));
                edge_midpoints.insert(edge, index);
            }
        }
    }

    // Second pass: three corner triangles and one center triangle per face.
    for face in mesh.faces() {
        let [v1, v2, v3] = face.indices();
        let m12 = edge_midpoints[&normalize_edge(v1, v2)];
        let m13 = edge_midpoints[&normalize_edge(v1, v3)];
        let m23 = edge_midpoints[&normalize_edge(v2, v3)];

        refined.add_face(Face::new(v1, m12, m13));
        refined.add_face(Face::new(v2, m23, m12));
        refined.add_face(Face::new(v3, m13, m23));
        refined.add_face(Face::new(m12, m23, m13));
    }

    debug!(
        "subdivided mesh: {} -> {} vertices, {} -> {} faces",
        vertex_count,
        refined.vertices().len(),
        face_count,
        refined.faces().len()
    );

    refined
}

/// Smoothed replacement position for an original vertex.
///
/// Uses weight `beta = 3/16` for valence 3, else `3/(8n)`; the new position
/// is `orig * (1 - n * beta) + neighbor_sum * beta`. A vertex without
/// neighbors keeps its position.
fn smoothed_position(vertex: &Vertex, vertices: &[Vertex]) -> Point3<f64> {
    let neighbors = vertex.neighbors();
    let n = neighbors.len();
    if n == 0 {
        return vertex.position;
    }

    let beta = if n == 3 { 3.0 / 16.0 } else { 3.0 / (8.0 * n as f64) };
    let neighbor_sum: Vector3<f64> = neighbors
        .iter()
        .map(|&index| vertices[index as usize].position.coords)
        .sum();

    Point3::from(vertex.position.coords * (1.0 - n as f64 * beta) + neighbor_sum * beta)
}
