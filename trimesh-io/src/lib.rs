//! Mesh file I/O for trimesh.
//!
//! This crate provides loading and saving of triangle meshes in three
//! formats, keyed by file extension:
//!
//! - **PLY** (`.ply`) - element-header ASCII polygon format
//! - **STL** (`.stl`) - facet-list ASCII format
//! - **COLLADA** (`.dae`) - XML scene geometry
//!
//! Each codec independently implements load (bytes to vertices, faces and
//! adjacency) and save (vertices and faces to bytes) against the shared
//! [`TriMesh`] representation.
//!
//! # Example
//!
//! ```no_run
//! use trimesh_io::{load_mesh, save_mesh};
//!
//! // Format detected from the extension
//! let mesh = load_mesh("model.ply").unwrap();
//!
//! // Convert to a different format; do not overwrite an existing file
//! save_mesh(&mesh, "model.stl", false).unwrap();
//! ```
//!
//! # Errors
//!
//! All failures map onto the closed [`IoError`] taxonomy. Loading
//! distinguishes a missing file from other I/O failures; saving refuses to
//! touch an existing file unless overwriting is allowed, before any byte is
//! written.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod collada;
mod error;
mod ply;
mod stl;

pub use collada::{load_collada, save_collada};
pub use error::{IoError, IoResult};
pub use ply::{load_ply, save_ply};
pub use stl::{load_stl, save_stl};

use std::path::Path;

use trimesh_types::TriMesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// PLY element-header ASCII format.
    Ply,
    /// STL facet-list ASCII format.
    Stl,
    /// COLLADA XML scene geometry.
    Collada,
}

impl MeshFormat {
    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    ///
    /// # Example
    ///
    /// ```
    /// use trimesh_io::MeshFormat;
    ///
    /// assert_eq!(MeshFormat::from_path("model.ply"), Some(MeshFormat::Ply));
    /// assert_eq!(MeshFormat::from_path("scene.DAE"), Some(MeshFormat::Collada));
    /// assert_eq!(MeshFormat::from_path("model.obj"), None);
    /// ```
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "ply" => Some(Self::Ply),
            "stl" => Some(Self::Stl),
            "dae" => Some(Self::Collada),
            _ => None,
        }
    }

    /// The canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Ply => "ply",
            Self::Stl => "stl",
            Self::Collada => "dae",
        }
    }
}

/// Describe the extension of `path` for an error message.
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("(none)")
        .to_string()
}

/// Load a mesh from a file, detecting the format from the extension.
///
/// # Errors
///
/// Returns [`IoError::InvalidFilepath`] for an empty path,
/// [`IoError::UnsupportedFormat`] for an unrecognized extension, and
/// propagates the codec's outcome otherwise.
///
/// # Example
///
/// ```no_run
/// use trimesh_io::load_mesh;
///
/// let mesh = load_mesh("model.stl").unwrap();
/// ```
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<TriMesh> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(IoError::InvalidFilepath);
    }

    let format = MeshFormat::from_path(path).ok_or_else(|| IoError::UnsupportedFormat {
        extension: extension_of(path),
    })?;

    match format {
        MeshFormat::Ply => load_ply(path),
        MeshFormat::Stl => load_stl(path),
        MeshFormat::Collada => load_collada(path),
    }
}

/// Save a mesh to a file, detecting the format from the extension.
///
/// When `can_overwrite` is false, an existing target fails with
/// [`IoError::FileAlreadyExists`] before any byte is written.
///
/// # Errors
///
/// Returns [`IoError::InvalidFilepath`] for an empty path,
/// [`IoError::UnsupportedFormat`] for an unrecognized extension, and
/// propagates the codec's outcome otherwise.
///
/// # Example
///
/// ```no_run
/// use trimesh_io::{load_mesh, save_mesh};
///
/// let mesh = load_mesh("input.stl").unwrap();
/// save_mesh(&mesh, "output.dae", true).unwrap();
/// ```
pub fn save_mesh<P: AsRef<Path>>(mesh: &TriMesh, path: P, can_overwrite: bool) -> IoResult<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(IoError::InvalidFilepath);
    }

    let format = MeshFormat::from_path(path).ok_or_else(|| IoError::UnsupportedFormat {
        extension: extension_of(path),
    })?;

    match format {
        MeshFormat::Ply => save_ply(mesh, path, can_overwrite),
        MeshFormat::Stl => save_stl(mesh, path, can_overwrite),
        MeshFormat::Collada => save_collada(mesh, path, can_overwrite),
    }
}
