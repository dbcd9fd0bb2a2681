//! COLLADA (XML scene geometry) format support.
//!
//! Only the geometry subset is handled. Loading walks
//! `COLLADA -> library_geometries -> geometry -> mesh`: every
//! `source/float_array` contributes a flat float list grouped into vertex
//! triples, and every `triangles/p` contributes a flat index list grouped
//! into faces (registering adjacency). Either list failing to divide by
//! three, or any XML syntax error, is invalid data.
//!
//! Saving emits a minimal single-geometry document: a `float_array` of all
//! coordinates, an `accessor` describing the 3-float stride, and one
//! `triangles` element whose `p` child lists all face index triples.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::debug;
use trimesh_types::{Face, TriMesh, Vertex};

use crate::error::{IoError, IoResult};

/// Load a mesh from a COLLADA (`.dae`) file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] or [`IoError::UnknownIo`] if the file
/// cannot be opened, and [`IoError::InvalidData`] if the XML is malformed
/// or a geometry array has the wrong shape.
///
/// # Example
///
/// ```no_run
/// use trimesh_io::load_collada;
///
/// let mesh = load_collada("scene.dae").unwrap();
/// println!("{} faces", mesh.faces().len());
/// ```
pub fn load_collada<P: AsRef<Path>>(path: P) -> IoResult<TriMesh> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::UnknownIo(e)
        }
    })?;

    let mut content = String::new();
    file.read_to_string(&mut content)?;

    let mesh = parse_collada(&content)?;

    debug!(
        "loaded COLLADA mesh: {} vertices, {} faces",
        mesh.vertices().len(),
        mesh.faces().len()
    );

    Ok(mesh)
}

/// Parse the COLLADA document content.
fn parse_collada(content: &str) -> IoResult<TriMesh> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut mesh = TriMesh::new();

    let mut in_collada = false;
    let mut in_library = false;
    let mut in_geometry = false;
    let mut in_mesh = false;
    let mut in_source = false;
    let mut in_float_array = false;
    let mut in_triangles = false;
    let mut in_p = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"COLLADA" => in_collada = true,
                b"library_geometries" if in_collada => in_library = true,
                b"geometry" if in_library => in_geometry = true,
                b"mesh" if in_geometry => in_mesh = true,
                b"source" if in_mesh => in_source = true,
                b"float_array" if in_source => in_float_array = true,
                b"triangles" if in_mesh => in_triangles = true,
                b"p" if in_triangles => in_p = true,
                _ => {}
            },
            Ok(Event::Text(ref t)) => {
                if in_float_array || in_p {
                    let text = t
                        .unescape()
                        .map_err(|e| IoError::invalid_data(format!("invalid XML text: {e}")))?;
                    if in_float_array {
                        consume_float_array(&text, &mut mesh)?;
                    } else {
                        consume_index_list(&text, &mut mesh)?;
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"COLLADA" => in_collada = false,
                b"library_geometries" => in_library = false,
                b"geometry" => in_geometry = false,
                b"mesh" => in_mesh = false,
                b"source" => in_source = false,
                b"float_array" => in_float_array = false,
                b"triangles" => in_triangles = false,
                b"p" => in_p = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(IoError::invalid_data(format!("XML parse error: {e}")));
            }
            _ => {}
        }
    }

    Ok(mesh)
}

/// Append the vertices of a `float_array` text node to the mesh.
fn consume_float_array(text: &str, mesh: &mut TriMesh) -> IoResult<()> {
    let mut floats = Vec::new();
    for token in text.split_whitespace() {
        let value: f64 = token
            .parse()
            .map_err(|_| IoError::invalid_data(format!("malformed float {token:?}")))?;
        floats.push(value);
    }

    if floats.len() % 3 != 0 {
        return Err(IoError::invalid_data(format!(
            "float_array length {} is not divisible by 3",
            floats.len()
        )));
    }

    for triple in floats.chunks_exact(3) {
        mesh.add_vertex(Vertex::from_coords(triple[0], triple[1], triple[2]));
    }

    Ok(())
}

/// Append the faces of a `p` text node to the mesh, with adjacency.
fn consume_index_list(text: &str, mesh: &mut TriMesh) -> IoResult<()> {
    let mut indices = Vec::new();
    for token in text.split_whitespace() {
        let value: u32 = token
            .parse()
            .map_err(|_| IoError::invalid_data(format!("malformed index {token:?}")))?;
        indices.push(value);
    }

    if indices.len() % 3 != 0 {
        return Err(IoError::invalid_data(format!(
            "triangle index list length {} is not divisible by 3",
            indices.len()
        )));
    }

    for triple in indices.chunks_exact(3) {
        mesh.add_face(Face::new(triple[0], triple[1], triple[2]));
    }

    Ok(())
}

/// Save a mesh to a COLLADA (`.dae`) file.
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
/// use trimesh_io::{load_collada, save_collada};
///
/// let mesh = load_collada("input.dae").unwrap();
/// save_collada(&mesh, "output.dae", true).unwrap();
/// ```
pub fn save_collada<P: AsRef<Path>>(mesh: &TriMesh, path: P, can_overwrite: bool) -> IoResult<()> {
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

    let document = generate_collada(mesh)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&document)?;

    debug!(
        "saved COLLADA mesh: {} vertices, {} faces",
        mesh.vertices().len(),
        mesh.faces().len()
    );

    Ok(())
}

/// Generate the COLLADA document bytes.
fn generate_collada(mesh: &TriMesh) -> IoResult<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    let write_error =
        |e: quick_xml::Error| IoError::invalid_data(format!("failed to write XML: {e}"));

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;

    let mut collada = BytesStart::new("COLLADA");
    collada.push_attribute(("version", "1.5.0"));
    writer.write_event(Event::Start(collada)).map_err(write_error)?;

    writer
        .write_event(Event::Start(BytesStart::new("library_geometries")))
        .map_err(write_error)?;

    let mut geometry = BytesStart::new("geometry");
    geometry.push_attribute(("id", "mesh"));
    writer.write_event(Event::Start(geometry)).map_err(write_error)?;

    writer
        .write_event(Event::Start(BytesStart::new("mesh")))
        .map_err(write_error)?;

    // Coordinate source
    let mut source = BytesStart::new("source");
    source.push_attribute(("id", "mesh-coords"));
    writer.write_event(Event::Start(source)).map_err(write_error)?;

    let mut float_array = BytesStart::new("float_array");
    float_array.push_attribute(("id", "mesh-coords-array"));
    float_array.push_attribute(("count", (mesh.vertices().len() * 3).to_string().as_str()));
    writer.write_event(Event::Start(float_array)).map_err(write_error)?;

    let coordinates = mesh
        .vertices()
        .iter()
        .map(|v| format!("{} {} {}", v.position.x, v.position.y, v.position.z))
        .collect::<Vec<_>>()
        .join(" ");
    writer
        .write_event(Event::Text(BytesText::new(&coordinates)))
        .map_err(write_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("float_array")))
        .map_err(write_error)?;

    writer
        .write_event(Event::Start(BytesStart::new("technique_common")))
        .map_err(write_error)?;

    let mut accessor = BytesStart::new("accessor");
    accessor.push_attribute(("count", mesh.vertices().len().to_string().as_str()));
    accessor.push_attribute(("offset", "0"));
    accessor.push_attribute(("source", "#mesh-coords-array"));
    accessor.push_attribute(("stride", "3"));
    writer.write_event(Event::Start(accessor)).map_err(write_error)?;

    for name in ["X", "Y", "Z"] {
        let mut param = BytesStart::new("param");
        param.push_attribute(("name", name));
        param.push_attribute(("type", "float"));
        writer.write_event(Event::Empty(param)).map_err(write_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("accessor")))
        .map_err(write_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("technique_common")))
        .map_err(write_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("source")))
        .map_err(write_error)?;

    // Vertex input
    let mut vertices = BytesStart::new("vertices");
    vertices.push_attribute(("id", "mesh-vertices"));
    writer.write_event(Event::Start(vertices)).map_err(write_error)?;

    let mut input = BytesStart::new("input");
    input.push_attribute(("semantic", "POSITION"));
    input.push_attribute(("source", "#mesh-coords"));
    writer.write_event(Event::Empty(input)).map_err(write_error)?;

    writer
        .write_event(Event::End(BytesEnd::new("vertices")))
        .map_err(write_error)?;

    // Triangles
    let mut triangles = BytesStart::new("triangles");
    triangles.push_attribute(("count", mesh.faces().len().to_string().as_str()));
    writer.write_event(Event::Start(triangles)).map_err(write_error)?;

    let mut input = BytesStart::new("input");
    input.push_attribute(("offset", "0"));
    input.push_attribute(("semantic", "VERTEX"));
    input.push_attribute(("source", "#mesh-vertices"));
    writer.write_event(Event::Empty(input)).map_err(write_error)?;

    writer
        .write_event(Event::Start(BytesStart::new("p")))
        .map_err(write_error)?;

    let indices = mesh
        .faces()
        .iter()
        .map(|face| {
            let [v1, v2, v3] = face.indices();
            format!("{v1} {v2} {v3}")
        })
        .collect::<Vec<_>>()
        .join(" ");
    writer
        .write_event(Event::Text(BytesText::new(&indices)))
        .map_err(write_error)?;

    writer
        .write_event(Event::End(BytesEnd::new("p")))
        .map_err(write_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("triangles")))
        .map_err(write_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("mesh")))
        .map_err(write_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("geometry")))
        .map_err(write_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("library_geometries")))
        .map_err(write_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("COLLADA")))
        .map_err(write_error)?;

    Ok(writer.into_inner())
}
