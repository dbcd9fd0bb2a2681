//! Indexed triangle mesh.

use nalgebra::Vector3;
use rand::Rng;

use crate::{Aabb, EdgeIncidence, Face, MeshBounds, MeshTopology, Vertex};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// The mesh is the sole owner of its vertex and face sequences. Faces
/// reference vertices by index; vertex adjacency is registered through
/// [`TriMesh::add_face`], which is the single path the format codecs and
/// subdivision use to keep topology consistent.
///
/// # Winding Order
///
/// Faces use counter-clockwise (CCW) winding when viewed from outside, so
/// normals point outward by the right-hand rule. [`TriMesh::invert`]
/// reverses the winding of every face.
///
/// # Example
///
/// ```
/// use trimesh_types::{TriMesh, Vertex, Face};
///
/// let mut mesh = TriMesh::new();
/// mesh.add_vertex(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.add_vertex(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.add_vertex(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.add_face(Face::new(0, 1, 2));
///
/// assert_eq!(mesh.vertices().len(), 3);
/// assert_eq!(mesh.faces().len(), 1);
/// assert_eq!(mesh.vertices()[0].neighbors(), &[1, 2]);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriMesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl TriMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from already-built vertex and face sequences.
    ///
    /// No adjacency is registered; the caller is responsible for the
    /// topology carried by `vertices`.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Read-only view of the vertex sequence.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Read-only view of the face sequence.
    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Append a vertex and return its index.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh indices are u32, meshes with >4B vertices are unsupported
    pub fn add_vertex(&mut self, vertex: Vertex) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    /// Append a face and register its three vertex pairs as mutual
    /// adjacency entries.
    ///
    /// # Panics
    ///
    /// Panics if any face index is out of range of the vertex sequence.
    /// Face indices are positions, not checked references (dangling indices
    /// are a caller error).
    pub fn add_face(&mut self, face: Face) {
        let [v1, v2, v3] = face.indices();
        self.faces.push(face);

        self.vertices[v1 as usize].add_neighbor(v2);
        self.vertices[v1 as usize].add_neighbor(v3);
        self.vertices[v2 as usize].add_neighbor(v1);
        self.vertices[v2 as usize].add_neighbor(v3);
        self.vertices[v3 as usize].add_neighbor(v1);
        self.vertices[v3 as usize].add_neighbor(v2);
    }

    /// Total surface area: the sum over all faces of half the magnitude of
    /// the cross product of two edge vectors.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.faces
            .iter()
            .map(|face| {
                let [v1, v2, v3] = face.indices();
                let p1 = self.vertices[v1 as usize].position;
                let p2 = self.vertices[v2 as usize].position;
                let p3 = self.vertices[v3 as usize].position;
                (p2 - p1).cross(&(p3 - p1)).norm() * 0.5
            })
            .sum()
    }

    /// Check if the mesh is closed (watertight and manifold).
    ///
    /// True iff every edge is shared by exactly two faces.
    ///
    /// # Example
    ///
    /// ```
    /// use trimesh_types::unit_cube;
    ///
    /// assert!(unit_cube().is_closed());
    /// ```
    #[must_use]
    pub fn is_closed(&self) -> bool {
        EdgeIncidence::build(&self.faces).is_closed()
    }

    /// Translate every vertex by `offset`.
    pub fn translate(&mut self, offset: Vector3<f64>) -> &mut Self {
        for vertex in &mut self.vertices {
            vertex.translate(offset);
        }
        self
    }

    /// Center the mesh on the origin.
    ///
    /// Every vertex is translated by the negated midpoint of the axis-aligned
    /// bounding box. A mesh without vertices is left untouched.
    pub fn center(&mut self) -> &mut Self {
        let bounds = self.bounds();
        if !bounds.is_empty() {
            let midpoint = bounds.center();
            self.translate(-midpoint.coords);
        }
        self
    }

    /// Reverse the winding of every face.
    pub fn invert(&mut self) -> &mut Self {
        for face in &mut self.faces {
            face.invert();
        }
        self
    }

    /// Scale every vertex by `factor` around the origin.
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        for vertex in &mut self.vertices {
            vertex.scale(factor);
        }
        self
    }

    /// Perturb every vertex by a uniform random offset in
    /// `[-coefficient, coefficient]` per component.
    ///
    /// Draws from the thread-local generator and is not reproducible; use
    /// [`TriMesh::noise_with`] to inject a seeded source in tests.
    pub fn noise(&mut self, coefficient: f64) -> &mut Self {
        self.noise_with(&mut rand::thread_rng(), coefficient)
    }

    /// Perturb every vertex using the provided random source.
    ///
    /// Each of the three offset components is drawn independently from a
    /// uniform distribution over `[-coefficient, coefficient]`.
    pub fn noise_with<R: Rng + ?Sized>(&mut self, rng: &mut R, coefficient: f64) -> &mut Self {
        for vertex in &mut self.vertices {
            let offset = Vector3::new(
                rng.gen_range(-coefficient..=coefficient),
                rng.gen_range(-coefficient..=coefficient),
                rng.gen_range(-coefficient..=coefficient),
            );
            vertex.translate(offset);
        }
        self
    }

    /// Refine the mesh by one subdivision step.
    ///
    /// Every original vertex is moved to a smoothed position blended from
    /// its neighbors, every edge gains a midpoint vertex shared by its two
    /// incident faces, and every face is replaced by four (three corner
    /// triangles and one center triangle). The vertex and face sequences
    /// are swapped in atomically and adjacency is rebuilt.
    ///
    /// # Example
    ///
    /// ```
    /// use trimesh_types::unit_cube;
    ///
    /// let mut mesh = unit_cube();
    /// mesh.subdivide();
    ///
    /// // 12 faces become 48; 8 vertices gain 18 edge midpoints.
    /// assert_eq!(mesh.faces().len(), 48);
    /// assert_eq!(mesh.vertices().len(), 26);
    /// ```
    pub fn subdivide(&mut self) -> &mut Self {
        *self = crate::subdivide::subdivide(self);
        self
    }
}

impl MeshTopology for TriMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    fn face(&self, index: usize) -> Option<Face> {
        self.faces.get(index).copied()
    }
}

impl MeshBounds for TriMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }
}

/// Create a unit cube mesh spanning (0,0,0) to (1,1,1).
///
/// 8 vertices and 12 triangles with outward CCW winding; adjacency is
/// registered. Useful as a closed-mesh fixture.
///
/// # Example
///
/// ```
/// use trimesh_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertices().len(), 8);
/// assert_eq!(cube.faces().len(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> TriMesh {
    let mut mesh = TriMesh::with_capacity(8, 12);

    mesh.add_vertex(Vertex::from_coords(0.0, 0.0, 0.0)); // 0
    mesh.add_vertex(Vertex::from_coords(1.0, 0.0, 0.0)); // 1
    mesh.add_vertex(Vertex::from_coords(1.0, 1.0, 0.0)); // 2
    mesh.add_vertex(Vertex::from_coords(0.0, 1.0, 0.0)); // 3
    mesh.add_vertex(Vertex::from_coords(0.0, 0.0, 1.0)); // 4
    mesh.add_vertex(Vertex::from_coords(1.0, 0.0, 1.0)); // 5
    mesh.add_vertex(Vertex::from_coords(1.0, 1.0, 1.0)); // 6
    mesh.add_vertex(Vertex::from_coords(0.0, 1.0, 1.0)); // 7

    // Bottom face (z=0) - normal points -Z
    mesh.add_face(Face::new(0, 2, 1));
    mesh.add_face(Face::new(0, 3, 2));

    // Top face (z=1) - normal points +Z
    mesh.add_face(Face::new(4, 5, 6));
    mesh.add_face(Face::new(4, 6, 7));

    // Front face (y=0) - normal points -Y
    mesh.add_face(Face::new(0, 1, 5));
    mesh.add_face(Face::new(0, 5, 4));

    // Back face (y=1) - normal points +Y
    mesh.add_face(Face::new(3, 7, 6));
    mesh.add_face(Face::new(3, 6, 2));

    // Left face (x=0) - normal points -X
    mesh.add_face(Face::new(0, 4, 7));
    mesh.add_face(Face::new(0, 7, 3));

    // Right face (x=1) - normal points +X
    mesh.add_face(Face::new(1, 2, 6));
    mesh.add_face(Face::new(1, 6, 5));

    mesh
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_mesh() {
        let mesh = TriMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.area(), 0.0);
    }

    #[test]
    fn add_face_registers_adjacency() {
        let mut mesh = TriMesh::new();
        mesh.add_vertex(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.add_vertex(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.add_vertex(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.add_face(Face::new(0, 1, 2));

        assert_eq!(mesh.vertices()[0].neighbors(), &[1, 2]);
        assert_eq!(mesh.vertices()[1].neighbors(), &[0, 2]);
        assert_eq!(mesh.vertices()[2].neighbors(), &[0, 1]);
    }

    #[test]
    fn cube_adjacency_sum() {
        let cube = unit_cube();
        let total: usize = cube.vertices().iter().map(|v| v.neighbors().len()).sum();
        // 18 undirected edges, two directed entries each
        assert_eq!(total, 36);
    }

    #[test]
    fn unit_cube_area() {
        let cube = unit_cube();
        assert_relative_eq!(cube.area(), 6.0);
    }

    #[test]
    fn scaled_cube_area() {
        // Edge length 2: six faces of area 4 each
        let mut cube = unit_cube();
        cube.scale(2.0);
        assert_relative_eq!(cube.area(), 24.0);
    }

    #[test]
    fn cube_is_closed() {
        assert!(unit_cube().is_closed());
    }

    #[test]
    fn open_mesh_is_not_closed() {
        let mut mesh = TriMesh::new();
        mesh.add_vertex(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.add_vertex(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.add_vertex(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.add_face(Face::new(0, 1, 2));
        assert!(!mesh.is_closed());
    }

    #[test]
    fn center_moves_bounding_box_midpoint_to_origin() {
        let mut cube = unit_cube();
        cube.scale(2.0);
        cube.center();

        // The (0,0,0)-(2,2,2) cube centers to all +/-1 combinations
        for vertex in cube.vertices() {
            assert_eq!(vertex.position.x.abs(), 1.0);
            assert_eq!(vertex.position.y.abs(), 1.0);
            assert_eq!(vertex.position.z.abs(), 1.0);
        }
        assert_eq!(cube.vertices()[0].position, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(cube.vertices()[6].position, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn center_on_empty_mesh_is_noop() {
        let mut mesh = TriMesh::new();
        mesh.center();
        assert!(mesh.vertices().is_empty());
    }

    #[test]
    fn invert_reverses_every_face() {
        let mut cube = unit_cube();
        let before: Vec<[u32; 3]> = cube.faces().iter().map(Face::indices).collect();
        cube.invert();
        for (face, original) in cube.faces().iter().zip(&before) {
            assert_eq!(face.indices(), [original[2], original[1], original[0]]);
        }
        cube.invert();
        let restored: Vec<[u32; 3]> = cube.faces().iter().map(Face::indices).collect();
        assert_eq!(restored, before);
    }

    #[test]
    fn scale_doubles_coordinates() {
        let mut cube = unit_cube();
        cube.scale(2.0);
        assert_eq!(cube.vertices()[6].position, Point3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn translate_offsets_every_vertex() {
        let mut cube = unit_cube();
        cube.translate(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(cube.vertices()[0].position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn noise_stays_within_coefficient() {
        let mut cube = unit_cube();
        let original: Vec<Point3<f64>> = cube.vertices().iter().map(|v| v.position).collect();

        let mut rng = StdRng::seed_from_u64(42);
        cube.noise_with(&mut rng, 0.1);

        for (vertex, before) in cube.vertices().iter().zip(&original) {
            assert!((vertex.position.x - before.x).abs() <= 0.1);
            assert!((vertex.position.y - before.y).abs() <= 0.1);
            assert!((vertex.position.z - before.z).abs() <= 0.1);
        }
    }

    #[test]
    fn noise_with_zero_coefficient_is_noop() {
        let mut cube = unit_cube();
        let original: Vec<Point3<f64>> = cube.vertices().iter().map(|v| v.position).collect();

        let mut rng = StdRng::seed_from_u64(7);
        cube.noise_with(&mut rng, 0.0);

        for (vertex, before) in cube.vertices().iter().zip(&original) {
            assert_eq!(vertex.position, *before);
        }
    }

    #[test]
    fn bounds_of_cube() {
        let bounds = unit_cube().bounds();
        assert_eq!(bounds.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.max, Point3::new(1.0, 1.0, 1.0));
    }
}
