//! Vertex type with position and adjacency.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A vertex in 3D space with its adjacent vertex indices.
///
/// The position is stored as a `Point3<f64>` for high precision. The
/// adjacency list holds the indices of neighboring vertices in the owning
/// mesh's vertex sequence, in insertion order, without duplicates. It is
/// populated by the format codecs while faces are consumed, and rebuilt by
/// subdivision.
///
/// Equality compares exact positions only; adjacency is ignored.
///
/// # Example
///
/// ```
/// use trimesh_types::{Vertex, Point3};
///
/// let v1 = Vertex::new(Point3::new(1.0, 2.0, 3.0));
/// let v2 = Vertex::from_coords(1.0, 2.0, 3.0);
///
/// assert_eq!(v1, v2);
/// assert!(v1.neighbors().is_empty());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// 3D position.
    pub position: Point3<f64>,

    /// Indices of adjacent vertices, insertion order, no duplicates.
    neighbors: Vec<u32>,
}

impl Vertex {
    /// Create a new vertex with no adjacency.
    ///
    /// # Example
    ///
    /// ```
    /// use trimesh_types::{Vertex, Point3};
    ///
    /// let v = Vertex::new(Point3::new(1.0, 2.0, 3.0));
    /// assert_eq!(v.position.x, 1.0);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            neighbors: Vec::new(),
        }
    }

    /// Create a vertex from raw coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use trimesh_types::Vertex;
    ///
    /// let v = Vertex::from_coords(1.0, 2.0, 3.0);
    /// assert_eq!(v.position.y, 2.0);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Indices of adjacent vertices, in insertion order.
    #[inline]
    #[must_use]
    pub fn neighbors(&self) -> &[u32] {
        &self.neighbors
    }

    /// Record `index` as adjacent to this vertex.
    ///
    /// Idempotent: an index already present is not added again. The scan is
    /// linear; adjacency lists of triangle meshes stay small.
    pub fn add_neighbor(&mut self, index: u32) {
        if !self.neighbors.contains(&index) {
            self.neighbors.push(index);
        }
    }

    /// Translate the vertex by `offset`, in place.
    ///
    /// Returns `&mut Self` for chaining.
    #[inline]
    pub fn translate(&mut self, offset: Vector3<f64>) -> &mut Self {
        self.position += offset;
        self
    }

    /// Scale all three coordinates by `factor`, in place.
    ///
    /// Returns `&mut Self` for chaining.
    #[inline]
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        self.position.coords *= factor;
        self
    }
}

impl PartialEq for Vertex {
    /// Exact component comparison of positions; adjacency is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}

impl From<(f64, f64, f64)> for Vertex {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::from_coords(x, y, z)
    }
}
