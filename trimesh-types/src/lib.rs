//! Core triangle mesh types for trimesh.
//!
//! This crate provides the foundational types for mesh processing:
//!
//! - [`Vertex`] - A point in 3D space with its adjacent vertex indices
//! - [`Face`] - A triangle as three vertex indices
//! - [`TriMesh`] - The indexed triangle mesh owning both sequences
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`EdgeIncidence`] - Per-edge face incidence counts
//!
//! # Data Model
//!
//! The mesh owns its vertex and face sequences; everything else refers to
//! vertices by integer index. Vertex adjacency is an undirected graph kept
//! on the vertices themselves and registered through [`TriMesh::add_face`].
//! Indices are positions, not checked references: they become stale only if
//! the owning sequence changes, which the library never does except by
//! replacing the sequences wholesale during subdivision.
//!
//! # Units
//!
//! This library is unit-agnostic. All coordinates are `f64`.
//!
//! # Coordinate System
//!
//! Right-handed; face winding is counter-clockwise when viewed from
//! outside, so normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use trimesh_types::{TriMesh, Vertex, Face};
//!
//! let mut mesh = TriMesh::new();
//! mesh.add_vertex(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.add_vertex(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.add_vertex(Vertex::from_coords(0.5, 1.0, 0.0));
//! mesh.add_face(Face::new(0, 1, 2));
//!
//! assert!((mesh.area() - 0.5).abs() < 1e-10);
//! assert!(!mesh.is_closed());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adjacency;
mod bounds;
mod face;
mod mesh;
mod subdivide;
mod traits;
mod vertex;

pub use adjacency::EdgeIncidence;
pub use bounds::Aabb;
pub use face::Face;
pub use mesh::{unit_cube, TriMesh};
pub use traits::{MeshBounds, MeshTopology};
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
