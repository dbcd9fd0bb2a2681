//! Triangle face as vertex indices.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle face: three indices into the owning mesh's vertex sequence.
///
/// Index order encodes the winding, and thereby the normal direction by the
/// right-hand rule. The indices are positions, not owning references; they
/// are not validated against the vertex sequence.
///
/// # Example
///
/// ```
/// use trimesh_types::Face;
///
/// let mut face = Face::new(0, 1, 2);
/// face.invert();
/// assert_eq!(face.indices(), [2, 1, 0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face([u32; 3]);

impl Face {
    /// Create a face from three vertex indices.
    #[inline]
    #[must_use]
    pub const fn new(v1: u32, v2: u32, v3: u32) -> Self {
        Self([v1, v2, v3])
    }

    /// The three vertex indices, in winding order.
    #[inline]
    #[must_use]
    pub const fn indices(&self) -> [u32; 3] {
        self.0
    }

    /// Reverse the winding by swapping the first and third index.
    ///
    /// Applying `invert` twice restores the original order. Returns
    /// `&mut Self` for chaining.
    #[inline]
    pub fn invert(&mut self) -> &mut Self {
        self.0.swap(0, 2);
        self
    }
}

impl From<[u32; 3]> for Face {
    fn from(indices: [u32; 3]) -> Self {
        Self(indices)
    }
}
