//! The unfolding build pipeline.
//!
//! [`Unfolding::build`] is a pure function from `(mesh, config)` to the
//! built structures: merged vertices, planar faces, the spanning tree and
//! the pivot hierarchy. All geometric construction runs synchronously to
//! completion here; there is no global "current build" state. The only
//! mutable component is the animator
//! ([`UnfoldAnimator`](crate::scene::UnfoldAnimator)), which the caller
//! owns.

use log::debug;
use nalgebra::Point3;

use crate::algo::{
    build_tree, merge_coplanar_faces, select_root, solve_hinges, AdjacencyGraph, UnfoldTree,
};
use crate::config::UnfoldConfig;
use crate::error::{Result, UnfoldError};
use crate::mesh::{extract_faces, weld_vertices, Face, TriangleMesh};
use crate::scene::PivotHierarchy;

/// A fully built unfolding: faces, net, and pivot hierarchy for one mesh.
///
/// Owned exclusively per mesh; a rebuild replaces the whole structure
/// rather than mutating it in place.
#[derive(Debug, Clone)]
pub struct Unfolding {
    positions: Vec<Point3<f64>>,
    faces: Vec<Face>,
    tree: UnfoldTree,
    hierarchy: PivotHierarchy,
}

impl Unfolding {
    /// Run the full geometric pipeline over a raw triangle mesh.
    ///
    /// Fails on an empty mesh, out-of-range indices, invalid
    /// configuration, or an out-of-range explicit root face, in all
    /// cases without producing partial state. Degenerate triangles are
    /// dropped silently; unreachable faces are reported through
    /// [`unreachable_faces`](Self::unreachable_faces) (and a `log`
    /// warning), not as an error.
    pub fn build(mesh: &TriangleMesh, config: &UnfoldConfig) -> Result<Self> {
        config.validate()?;
        mesh.validate()?;

        let welded = weld_vertices(&mesh.positions, config.weld_epsilon);
        debug!(
            "welded {} raw vertices to {} merged",
            mesh.positions.len(),
            welded.len()
        );

        let triangles: Vec<[usize; 3]> = (0..mesh.num_triangles())
            .map(|i| {
                let [a, b, c] = mesh.triangle(i);
                [welded.remap[a], welded.remap[b], welded.remap[c]]
            })
            .collect();

        let raw_faces = extract_faces(&triangles, &welded.positions, config.parallel);
        if raw_faces.is_empty() {
            // Every input triangle was degenerate
            return Err(UnfoldError::EmptyMesh);
        }

        let faces = merge_coplanar_faces(
            &raw_faces,
            &welded.positions,
            config.merge_angle_threshold_deg,
            config.plane_tolerance(),
        );
        debug!(
            "merged {} triangles into {} planar faces",
            raw_faces.len(),
            faces.len()
        );

        let root = select_root(&faces, config.root_face)?;
        let graph = AdjacencyGraph::build(&faces, &welded.positions);
        let mut tree = build_tree(&faces, &graph, root);
        solve_hinges(&mut tree, &faces, &welded.positions);

        let hierarchy = PivotHierarchy::build(
            &tree,
            &faces,
            &welded.positions,
            config.show_boundary_edges,
        );

        Ok(Self {
            positions: welded.positions,
            faces,
            tree,
            hierarchy,
        })
    }

    /// The merged vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// The merged planar faces.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// The rooted unfold tree.
    #[inline]
    pub fn tree(&self) -> &UnfoldTree {
        &self.tree
    }

    /// The pivot transform hierarchy.
    #[inline]
    pub fn hierarchy(&self) -> &PivotHierarchy {
        &self.hierarchy
    }

    /// Mutable access for the animator.
    #[inline]
    pub(crate) fn hierarchy_mut(&mut self) -> &mut PivotHierarchy {
        &mut self.hierarchy
    }

    /// Number of faces unreachable from the root (non-fatal diagnostic).
    #[inline]
    pub fn unreachable_faces(&self) -> usize {
        self.tree.unreachable_faces()
    }
}
