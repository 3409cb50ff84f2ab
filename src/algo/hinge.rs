//! Hinge and unfold-angle solving.
//!
//! For every non-root tree node, computes the rotation that lays its face
//! flat against its parent: the pivot position (one endpoint of the shared
//! edge), the rotation axis (the shared-edge direction), and the signed
//! angle that takes the face from its current dihedral position to exactly
//! 180 degrees (coplanar with the parent, on the far side of the hinge).
//!
//! No geometry is mutated here; this stage only stores target rotations on
//! the tree nodes for the transform hierarchy and the animator to use.

use nalgebra::{Point3, Unit, Vector3};

use crate::mesh::{Face, NodeId};

use super::tree::UnfoldTree;

/// Tolerance below which a projected centroid offset counts as lying on
/// the hinge line.
const PROJECTION_EPSILON: f64 = 1e-9;

/// Fill in pivot, axis and unfold angle for every non-root node.
pub fn solve_hinges(tree: &mut UnfoldTree, faces: &[Face], positions: &[Point3<f64>]) {
    for id in 0..tree.num_nodes() {
        let node = tree.node(NodeId::new(id));
        let (parent, edge) = match (node.parent, node.shared_edge) {
            (Some(p), Some(e)) => (p, e),
            _ => continue, // root
        };

        let e0 = positions[edge.v0()];
        let e1 = positions[edge.v1()];
        let parent_centroid = faces[tree.node(parent).face.index()].centroid;
        let child_centroid = faces[node.face.index()].centroid;

        let (axis, angle_deg) = match Unit::try_new(e1 - e0, PROJECTION_EPSILON) {
            Some(axis) => {
                let mid = nalgebra::center(&e0, &e1);
                let angle = unfold_angle(&axis, &(parent_centroid - mid), &(child_centroid - mid));
                (axis, angle)
            }
            // Zero-length hinge after welding: leave the face unrotated
            None => (Vector3::x_axis(), 0.0),
        };

        let node = tree.node_mut(NodeId::new(id));
        node.pivot = e0;
        node.axis = axis;
        node.angle_deg = angle_deg;
    }
}

/// The signed rotation in degrees that brings the child side flat against
/// the parent side, rotating around `axis`.
///
/// Both centroid offsets are projected onto the plane perpendicular to the
/// axis. If either projection is near zero (centroid on the hinge line,
/// degenerate geometry) the angle is 0 and the face simply never moves.
fn unfold_angle(
    axis: &Unit<Vector3<f64>>,
    parent_offset: &Vector3<f64>,
    child_offset: &Vector3<f64>,
) -> f64 {
    let project = |v: &Vector3<f64>| v - axis.as_ref() * v.dot(axis);

    let p = project(parent_offset);
    let c = project(child_offset);
    if p.norm() < PROJECTION_EPSILON || c.norm() < PROJECTION_EPSILON {
        return 0.0;
    }

    let p = p.normalize();
    let c = c.normalize();
    let signed = p.cross(&c).dot(axis).atan2(p.dot(&c)).to_degrees();
    if signed == 0.0 {
        // Parent and child project to the same side; treated as degenerate
        // rather than emitting a +-180 flip of unstable sign.
        return 0.0;
    }
    (180.0 - signed.abs()) * signed.signum()
}
