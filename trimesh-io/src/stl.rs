//! STL (facet-list ASCII) format support.
//!
//! # Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! The format repeats shared-vertex coordinates per facet instead of
//! indexing them, so loading deduplicates positions through an
//! exact-equality map: a position seen before reuses its first-assigned
//! index, a new position appends to the vertex sequence. A face is emitted
//! on `endfacet` once exactly three vertex indices have accumulated, and
//! registers the six mutual adjacency entries.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use hashbrown::HashMap;
use tracing::debug;
use trimesh_types::{Face, TriMesh, Vertex};

use crate::error::{IoError, IoResult};

/// Load a mesh from an ASCII STL file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] or [`IoError::UnknownIo`] if the file
/// cannot be opened, and [`IoError::InvalidData`] on a malformed vertex
/// coordinate.
///
/// # Example
///
/// ```no_run
/// use trimesh_io::load_stl;
///
/// let mesh = load_stl("model.stl").unwrap();
/// println!("{} faces", mesh.faces().len());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<TriMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::UnknownIo(e)
        }
    })?;
    let reader = BufReader::new(file);

    let mut mesh = TriMesh::new();
    // Exact-position dedup: bit patterns keep equality exact
    let mut seen: HashMap<[u64; 3], u32> = HashMap::new();
    let mut pending: Vec<u32> = Vec::with_capacity(3);

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim_start();

        if let Some(rest) = trimmed.strip_prefix("vertex") {
            let mut parts = rest.split_whitespace();
            let x = next_coordinate(&mut parts, &line)?;
            let y = next_coordinate(&mut parts, &line)?;
            let z = next_coordinate(&mut parts, &line)?;

            let key = [x.to_bits(), y.to_bits(), z.to_bits()];
            let index = *seen
                .entry(key)
                .or_insert_with(|| mesh.add_vertex(Vertex::from_coords(x, y, z)));
            pending.push(index);
        } else if trimmed.starts_with("endfacet") && pending.len() == 3 {
            mesh.add_face(Face::new(pending[0], pending[1], pending[2]));
            pending.clear();
        }
    }

    debug!(
        "loaded STL mesh: {} vertices, {} faces",
        mesh.vertices().len(),
        mesh.faces().len()
    );

    Ok(mesh)
}

/// Take the next token of a `vertex` line as a coordinate.
fn next_coordinate<'a>(parts: &mut impl Iterator<Item = &'a str>, line: &str) -> IoResult<f64> {
    parts
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| IoError::invalid_data(format!("malformed vertex line {line:?}")))
}

/// Save a mesh to an ASCII STL file.
///
/// The solid name is the file stem. Each facet carries the unnormalized
/// cross product of its two edge vectors as the normal.
///
/// # Errors
///
/// Returns [`IoError::FileAlreadyExists`] if `path` exists and
/// `can_overwrite` is false (checked before any byte is written), or an
/// I/O error kind if the file cannot be created or written.
///
/// # Example
///
/// ```no_run
/// use trimesh_io::{load_stl, save_stl};
///
/// let mesh = load_stl("input.stl").unwrap();
/// save_stl(&mesh, "output.stl", true).unwrap();
/// ```
pub fn save_stl<P: AsRef<Path>>(mesh: &TriMesh, path: P, can_overwrite: bool) -> IoResult<()> {
    let path = path.as_ref();
    if !can_overwrite && path.exists() {
        return Err(IoError::FileAlreadyExists {
            path: path.to_path_buf(),
        });
    }

    let file = File::create(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::UnknownIo(e)
        }
    })?;
    let mut writer = BufWriter::new(file);

    let name = path
        .file_stem()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("mesh");

    writeln!(writer, "solid {name}")?;

    for face in mesh.faces() {
        let [v1, v2, v3] = face.indices();
        let p1 = mesh.vertices()[v1 as usize].position;
        let p2 = mesh.vertices()[v2 as usize].position;
        let p3 = mesh.vertices()[v3 as usize].position;
        let normal = (p2 - p1).cross(&(p3 - p1));

        writeln!(writer, "facet normal {} {} {}", normal.x, normal.y, normal.z)?;
        writeln!(writer, "outer loop")?;
        writeln!(writer, "vertex {} {} {}", p1.x, p1.y, p1.z)?;
        writeln!(writer, "vertex {} {} {}", p2.x, p2.y, p2.z)?;
        writeln!(writer, "vertex {} {} {}", p3.x, p3.y, p3.z)?;
        writeln!(writer, "endloop")?;
        writeln!(writer, "endfacet")?;
    }

    writeln!(writer, "endsolid {name}")?;

    debug!(
        "saved STL mesh: {} vertices, {} faces",
        mesh.vertices().len(),
        mesh.faces().len()
    );

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use trimesh_types::unit_cube;

    #[test]
    fn roundtrip_cube_deduplicates_vertices() {
        let original = unit_cube();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.stl");
        save_stl(&original, &path, false).unwrap();

        // 12 facets repeat each corner several times; dedup restores 8
        let loaded = load_stl(&path).unwrap();
        assert_eq!(loaded.vertices().len(), 8);
        assert_eq!(loaded.faces().len(), 12);
        assert!(loaded.is_closed());
    }

    #[test]
    fn load_registers_adjacency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.stl");
        save_stl(&unit_cube(), &path, false).unwrap();

        let loaded = load_stl(&path).unwrap();
        let total: usize = loaded.vertices().iter().map(|v| v.neighbors().len()).sum();
        assert_eq!(total, 36);
    }

    #[test]
    fn solid_name_is_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gizmo.stl");
        save_stl(&unit_cube(), &path, false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("solid gizmo\n"));
        assert!(content.trim_end().ends_with("endsolid gizmo"));
    }

    #[test]
    fn load_nonexistent_file() {
        let result = load_stl("nonexistent_file_12345.stl");
        assert!(matches!(result, Err(IoError::FileNotFound { .. })));
    }

    #[test]
    fn malformed_vertex_coordinate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.stl");
        std::fs::write(
            &path,
            "solid bad\nfacet normal 0 0 1\nouter loop\nvertex 0 zero 0\n",
        )
        .unwrap();

        let result = load_stl(&path);
        assert!(matches!(result, Err(IoError::InvalidData { .. })));
    }

    #[test]
    fn incomplete_facet_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.stl");
        std::fs::write(
            &path,
            "solid short\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nendloop\nendfacet\nendsolid short\n",
        )
        .unwrap();

        let loaded = load_stl(&path).unwrap();
        assert_eq!(loaded.vertices().len(), 2);
        assert!(loaded.faces().is_empty());
    }

    #[test]
    fn save_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.stl");
        save_stl(&unit_cube(), &path, false).unwrap();

        let result = save_stl(&unit_cube(), &path, false);
        assert!(matches!(result, Err(IoError::FileAlreadyExists { .. })));

        save_stl(&unit_cube(), &path, true).unwrap();
    }
}
