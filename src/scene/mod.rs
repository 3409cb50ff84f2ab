//! Pivot transform hierarchy and animation.
//!
//! The unfold tree is materialized as a chain of pivot nodes so that
//! rotating a parent carries all of its descendants, matching the physical
//! behavior of a hinged net. The root face sits directly under a fixed
//! origin with no rotation of its own; every other face hangs off a pivot
//! anchored at its hinge edge.
//!
//! Pivots live in an arena indexed by the same [`NodeId`]s as the unfold
//! tree, so parent/child links are plain indices and a rebuild tears the
//! whole structure down at once.

mod animate;
mod geometry;

pub use animate::{FoldState, UnfoldAnimator};
pub use geometry::{BoundaryOutline, FlatFaceGeometry};

use nalgebra::{Isometry3, Point3, Translation3, Unit, UnitQuaternion, Vector3};

use crate::algo::UnfoldTree;
use crate::mesh::{Face, FaceId, NodeId};

/// One pivot in the transform hierarchy.
#[derive(Debug, Clone)]
pub struct PivotNode {
    /// The merged face this pivot carries.
    pub face: FaceId,

    /// Parent pivot, `None` for the root.
    pub parent: Option<NodeId>,

    /// Child pivots.
    pub children: Vec<NodeId>,

    /// Translation from the parent frame to this pivot's origin, measured
    /// in the folded pose.
    pub local_position: Vector3<f64>,

    /// Current animated rotation about the hinge axis.
    pub rotation: UnitQuaternion<f64>,

    /// Hinge axis in this pivot's local frame.
    pub axis: Unit<Vector3<f64>>,

    /// Target unfold angle in degrees (0 for the root).
    pub target_angle_deg: f64,

    /// The face's flat geometry in this pivot's local space.
    pub geometry: FlatFaceGeometry,
}

impl PivotNode {
    /// The rotation at a given unfold fraction (0 = folded, 1 = flat).
    #[inline]
    pub fn rotation_at(&self, fraction: f64) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&self.axis, (self.target_angle_deg * fraction).to_radians())
    }
}

/// The rooted pivot hierarchy over an unfold tree.
#[derive(Debug, Clone)]
pub struct PivotHierarchy {
    pivots: Vec<PivotNode>,
}

impl PivotHierarchy {
    /// Materialize the hierarchy for a solved unfold tree.
    ///
    /// Tree nodes are created in BFS order, so a node's parent always
    /// precedes it; the build is a single forward pass.
    pub fn build(
        tree: &UnfoldTree,
        faces: &[Face],
        positions: &[Point3<f64>],
        extract_boundary: bool,
    ) -> Self {
        let mut pivots = Vec::with_capacity(tree.num_nodes());
        // Mesh-space pivot origins, used to express children relative to
        // their parent while everything is still in the folded pose.
        let mut origins: Vec<Point3<f64>> = Vec::with_capacity(tree.num_nodes());

        for node in tree.nodes() {
            let origin = match node.parent {
                Some(_) => node.pivot,
                None => Point3::origin(),
            };
            let parent_origin = node
                .parent
                .map(|p| origins[p.index()])
                .unwrap_or_else(Point3::origin);

            pivots.push(PivotNode {
                face: node.face,
                parent: node.parent,
                children: node.children.clone(),
                local_position: origin - parent_origin,
                rotation: UnitQuaternion::identity(),
                axis: node.axis,
                target_angle_deg: node.angle_deg,
                geometry: FlatFaceGeometry::build(
                    &faces[node.face.index()],
                    positions,
                    &origin,
                    extract_boundary,
                ),
            });
            origins.push(origin);
        }

        Self { pivots }
    }

    /// Number of pivots (one per reachable face).
    #[inline]
    pub fn len(&self) -> usize {
        self.pivots.len()
    }

    /// Whether the hierarchy is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pivots.is_empty()
    }

    /// The root pivot id.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// A pivot by id.
    #[inline]
    pub fn pivot(&self, id: NodeId) -> &PivotNode {
        &self.pivots[id.index()]
    }

    /// All pivots, indexed by [`NodeId`].
    #[inline]
    pub fn pivots(&self) -> &[PivotNode] {
        &self.pivots
    }

    /// Set a pivot's rotation to the given unfold fraction of its target.
    #[inline]
    pub fn set_fraction(&mut self, id: NodeId, fraction: f64) {
        let pivot = &mut self.pivots[id.index()];
        pivot.rotation = pivot.rotation_at(fraction);
    }

    /// Reset every pivot to identity rotation (the folded pose).
    pub fn reset(&mut self) {
        for pivot in &mut self.pivots {
            pivot.rotation = UnitQuaternion::identity();
        }
    }

    /// The pivot's transform from its local frame to world space,
    /// composed through all ancestors.
    pub fn world_transform(&self, id: NodeId) -> Isometry3<f64> {
        let pivot = &self.pivots[id.index()];
        let local = Isometry3::from_parts(Translation3::from(pivot.local_position), pivot.rotation);
        match pivot.parent {
            Some(parent) => self.world_transform(parent) * local,
            None => local,
        }
    }

    /// A vertex of a pivot's geometry, transformed to world space.
    pub fn world_vertex(&self, id: NodeId, vertex: usize) -> Point3<f64> {
        self.world_transform(id) * self.pivots[id.index()].geometry.vertices[vertex]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::{build_tree, solve_hinges, AdjacencyGraph};
    use crate::mesh::extract_faces;

    /// Two triangles hinged at a right angle along edge (0,1).
    fn hinged_pair() -> (Vec<Point3<f64>>, Vec<Face>, UnfoldTree) {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.0, 1.0),
        ];
        let faces = extract_faces(&[[0, 1, 2], [1, 0, 3]], &positions, false);
        let graph = AdjacencyGraph::build(&faces, &positions);
        let mut tree = build_tree(&faces, &graph, FaceId::new(0));
        solve_hinges(&mut tree, &faces, &positions);
        (positions, faces, tree)
    }

    #[test]
    fn test_folded_pose_reproduces_mesh() {
        let (positions, faces, tree) = hinged_pair();
        let hierarchy = PivotHierarchy::build(&tree, &faces, &positions, false);

        // With identity rotations, world-space geometry matches the mesh
        for id in 0..hierarchy.len() {
            let id = NodeId::new(id);
            let pivot = hierarchy.pivot(id);
            let face = &faces[pivot.face.index()];
            for (local, &merged) in face.vertices.iter().enumerate() {
                let world = hierarchy.world_vertex(id, local);
                assert!(
                    (world - positions[merged]).norm() < 1e-12,
                    "pivot {:?} vertex {} drifted",
                    id,
                    local
                );
            }
        }
    }

    #[test]
    fn test_child_pivot_anchored_at_hinge() {
        let (positions, faces, tree) = hinged_pair();
        let hierarchy = PivotHierarchy::build(&tree, &faces, &positions, false);

        let child_id = tree.node(tree.root()).children[0];
        let pivot = hierarchy.pivot(child_id);
        // Root origin is the world origin, so the child's local position
        // is the hinge endpoint itself
        assert!((pivot.local_position - positions[0].coords).norm() < 1e-12);
        assert_eq!(pivot.parent, Some(hierarchy.root()));
    }

    #[test]
    fn test_unfolded_child_lands_in_parent_plane() {
        let (positions, faces, tree) = hinged_pair();
        let mut hierarchy = PivotHierarchy::build(&tree, &faces, &positions, false);

        let child_id = tree.node(tree.root()).children[0];
        hierarchy.set_fraction(child_id, 1.0);

        let pivot = hierarchy.pivot(child_id);
        for local in 0..pivot.geometry.vertices.len() {
            let world = hierarchy.world_vertex(child_id, local);
            assert!(world.z.abs() < 1e-9, "vertex {} not flattened: {:?}", local, world);
        }

        // The hinge endpoints themselves must not move
        let hinge0 = hierarchy.world_vertex(child_id, 0);
        assert!((hinge0 - positions[0]).norm() < 1e-9);
    }

    #[test]
    fn test_rotating_parent_carries_child() {
        let (positions, faces, tree) = hinged_pair();
        let hierarchy = PivotHierarchy::build(&tree, &faces, &positions, false);

        let child_id = tree.node(tree.root()).children[0];
        let mut rotated = hierarchy.clone();
        // Nudge the root: children must follow rigidly
        rotated.pivots[0].rotation =
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), std::f64::consts::FRAC_PI_4);

        let before = hierarchy.world_vertex(child_id, 0);
        let after = rotated.world_vertex(child_id, 0);
        assert!((before - after).norm() > 1e-3);
    }
}
