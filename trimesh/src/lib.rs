//! Small triangle-mesh toolkit: one in-memory representation, three file
//! formats, and the geometry that depends on derived adjacency.
//!
//! This umbrella crate re-exports the trimesh crate family:
//!
//! - [`types`] - `TriMesh`, `Vertex`, `Face`, `Aabb`, topology traits,
//!   geometric queries and transforms, subdivision refinement
//! - [`io`] - PLY / STL / COLLADA codecs and extension-keyed dispatch
//!
//! # Quick Start
//!
//! ```no_run
//! use trimesh::prelude::*;
//!
//! // Load a mesh (format detected from the extension)
//! let mut mesh = trimesh::io::load_mesh("model.ply").unwrap();
//!
//! // Query and transform
//! assert!(mesh.is_closed());
//! mesh.center();
//! mesh.subdivide();
//!
//! // Save to a different format
//! trimesh::io::save_mesh(&mesh, "model.stl", false).unwrap();
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

/// Core data structures and geometry: `TriMesh`, `Vertex`, `Face`, `Aabb`.
pub use trimesh_types as types;

/// File I/O for the PLY, STL and COLLADA formats.
pub use trimesh_io as io;

/// Common imports for mesh processing.
///
/// # Usage
///
/// ```
/// use trimesh::prelude::*;
/// ```
pub mod prelude {
    pub use trimesh_io::{load_mesh, save_mesh, IoError, IoResult, MeshFormat};
    pub use trimesh_types::{
        unit_cube, Aabb, EdgeIncidence, Face, MeshBounds, MeshTopology, TriMesh, Vertex,
    };
}
