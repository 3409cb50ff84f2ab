//! Input mesh and low-level mesh processing.
//!
//! This module holds the raw input type ([`TriangleMesh`]) and the two
//! leaf stages of the unfolding pipeline: vertex welding and face
//! extraction. The input contract is deliberately loose: indices need not
//! be welded and triangles need not be planar-grouped, since the pipeline
//! performs both.
//!
//! # Example
//!
//! ```
//! use netfold::mesh::TriangleMesh;
//! use nalgebra::Point3;
//!
//! let mesh = TriangleMesh::new(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.5, 1.0, 0.0),
//!     ],
//!     vec![0, 1, 2],
//! );
//! assert_eq!(mesh.num_triangles(), 1);
//! ```

mod edge;
mod face;
mod index;
mod weld;

pub use edge::EdgeKey;
pub use face::{extract_faces, triangle_normal, Face};
pub use index::{FaceId, NodeId};
pub use weld::{weld_vertices, WeldedVertices};

use nalgebra::Point3;

use crate::error::{Result, UnfoldError};

/// A raw triangle mesh as provided by an external mesh-asset source.
///
/// `indices` are grouped in 3s; a trailing partial group is ignored.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Raw vertex positions (possibly containing duplicates).
    pub positions: Vec<Point3<f64>>,

    /// Triangle vertex indices, three per triangle.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Create a mesh from positions and flat triangle indices.
    pub fn new(positions: Vec<Point3<f64>>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// Number of whole triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// The i-th triangle's raw index triple.
    #[inline]
    pub fn triangle(&self, i: usize) -> [usize; 3] {
        [
            self.indices[3 * i] as usize,
            self.indices[3 * i + 1] as usize,
            self.indices[3 * i + 2] as usize,
        ]
    }

    /// Validate that the mesh is non-empty and all indices are in range.
    pub fn validate(&self) -> Result<()> {
        if self.num_triangles() == 0 {
            return Err(UnfoldError::EmptyMesh);
        }
        for i in 0..self.num_triangles() {
            for &vi in &self.triangle(i) {
                if vi >= self.positions.len() {
                    return Err(UnfoldError::InvalidVertexIndex {
                        triangle: i,
                        vertex: vi,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mesh_rejected() {
        let mesh = TriangleMesh::default();
        assert!(matches!(mesh.validate(), Err(UnfoldError::EmptyMesh)));
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let mesh = TriangleMesh::new(vec![Point3::new(0.0, 0.0, 0.0)], vec![0, 1, 2]);
        assert!(matches!(
            mesh.validate(),
            Err(UnfoldError::InvalidVertexIndex { triangle: 0, vertex: 1 })
        ));
    }

    #[test]
    fn test_trailing_partial_group_ignored() {
        let mesh = TriangleMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 1],
        );
        assert_eq!(mesh.num_triangles(), 1);
        assert!(mesh.validate().is_ok());
    }
}
