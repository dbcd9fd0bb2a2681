//! PLY (element-header ASCII) format support.
//!
//! Only the ASCII variant with the fixed vertex/face schema is handled:
//!
//! ```text
//! ply
//! format ascii 1.0
//! element vertex N
//! property float x
//! property float y
//! property float z
//! element face M
//! property list uchar int vertex_indices
//! end_header
//! x y z            (N lines)
//! 3 v1 v2 v3       (M lines)
//! ```
//!
//! The header is scanned line by line until `end_header`; the vertex and
//! face counts are parsed from the token at the fixed column offset of
//! their `element` lines. The body is consumed as a whitespace-separated
//! token stream: exactly N coordinate triples, then exactly M index groups
//! (the leading list length is read but only the triangle indices are
//! used). Every face registers its three vertex pairs as mutual adjacency
//! entries.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;
use trimesh_types::{Face, TriMesh, Vertex};

use crate::error::{IoError, IoResult};

/// Column offset of the count in an `element vertex N` line.
const VERTEX_COUNT_OFFSET: usize = 15;

/// Column offset of the count in an `element face M` line.
const FACE_COUNT_OFFSET: usize = 13;

/// Load a mesh from an ASCII PLY file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] or [`IoError::UnknownIo`] if the file
/// cannot be opened, and [`IoError::InvalidData`] on a malformed header
/// token, a malformed body token, or a truncated body.
///
/// # Example
///
/// ```no_run
/// use trimesh_io::load_ply;
///
/// let mesh = load_ply("model.ply").unwrap();
/// println!("{} vertices, {} faces", mesh.vertices().len(), mesh.faces().len());
/// ```
pub fn load_ply<P: AsRef<Path>>(path: P) -> IoResult<TriMesh> {
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
    let mut reader = BufReader::new(file);

    let mut vertex_count = 0_usize;
    let mut face_count = 0_usize;
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(IoError::invalid_data("header is missing end_header"));
        }

        if line.starts_with("end_header") {
            break;
        }

        if line.starts_with("element vertex") {
            vertex_count = parse_count(&line, VERTEX_COUNT_OFFSET)?;
        } else if line.starts_with("element face") {
            face_count = parse_count(&line, FACE_COUNT_OFFSET)?;
        }
    }

    let mut body = String::new();
    reader.read_to_string(&mut body)?;
    let mut tokens = body.split_whitespace();

    let mut mesh = TriMesh::with_capacity(vertex_count, face_count);

    for _ in 0..vertex_count {
        let x = next_float(&mut tokens)?;
        let y = next_float(&mut tokens)?;
        let z = next_float(&mut tokens)?;
        mesh.add_vertex(Vertex::from_coords(x, y, z));
    }

    for _ in 0..face_count {
        // The list length is read but only the triangle case is consumed
        let _list_length = next_index(&mut tokens)?;
        let v1 = next_index(&mut tokens)?;
        let v2 = next_index(&mut tokens)?;
        let v3 = next_index(&mut tokens)?;
        mesh.add_face(Face::new(v1, v2, v3));
    }

    debug!(
        "loaded PLY mesh: {} vertices, {} faces",
        mesh.vertices().len(),
        mesh.faces().len()
    );

    Ok(mesh)
}

/// Parse the numeric token starting at `offset` of an element line.
fn parse_count(line: &str, offset: usize) -> IoResult<usize> {
    line.get(offset..)
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| IoError::invalid_data(format!("malformed element count in {line:?}")))
}

/// Take the next token as a float.
fn next_float<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> IoResult<f64> {
    let token = tokens
        .next()
        .ok_or_else(|| IoError::invalid_data("unexpected end of PLY body"))?;
    token
        .parse()
        .map_err(|_| IoError::invalid_data(format!("malformed float {token:?}")))
}

/// Take the next token as a vertex index.
fn next_index<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> IoResult<u32> {
    let token = tokens
        .next()
        .ok_or_else(|| IoError::invalid_data("unexpected end of PLY body"))?;
    token
        .parse()
        .map_err(|_| IoError::invalid_data(format!("malformed index {token:?}")))
}

/// Save a mesh to an ASCII PLY file.
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
/// use trimesh_io::{load_ply, save_ply};
///
/// let mesh = load_ply("input.ply").unwrap();
/// save_ply(&mesh, "output.ply", true).unwrap();
/// ```
pub fn save_ply<P: AsRef<Path>>(mesh: &TriMesh, path: P, can_overwrite: bool) -> IoResult<()> {
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

    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "element vertex {}", mesh.vertices().len())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    writeln!(writer, "element face {}", mesh.faces().len())?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;

    for vertex in mesh.vertices() {
        let p = vertex.position;
        writeln!(writer, "{} {} {}", p.x, p.y, p.z)?;
    }

    for face in mesh.faces() {
        let [v1, v2, v3] = face.indices();
        writeln!(writer, "3 {v1} {v2} {v3}")?;
    }

    debug!(
        "saved PLY mesh: {} vertices, {} faces",
        mesh.vertices().len(),
        mesh.faces().len()
    );

    Ok(())
}
