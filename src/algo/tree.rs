//! Spanning-tree ("net") construction.
//!
//! Picks a root face and derives the unfold order via breadth-first
//! traversal of the adjacency graph. Each visited face becomes an
//! [`UnfoldNode`] in an arena, children holding index lists and parents
//! stored as indices, so the tree-shaped structure carries no reference
//! cycles and tears down wholesale on rebuild.
//!
//! Faces unreachable from the root (disconnected components, or faces
//! isolated by non-manifold edges) are counted and reported as a warning;
//! they are excluded from the tree and never animate.

use std::collections::VecDeque;

use log::{debug, warn};
use nalgebra::{Point3, Unit, Vector3};

use crate::error::{Result, UnfoldError};
use crate::mesh::{EdgeKey, Face, FaceId, NodeId};

use super::adjacency::AdjacencyGraph;

/// One node of the unfold tree, wrapping a merged face.
///
/// The hinge fields (`pivot`, `axis`, `angle_deg`) are zeroed here and
/// filled in by the hinge solver; they are derived data, not authoritative
/// geometry.
#[derive(Debug, Clone)]
pub struct UnfoldNode {
    /// The merged face this node unfolds.
    pub face: FaceId,

    /// Parent node, `None` for the root.
    pub parent: Option<NodeId>,

    /// Child nodes, in BFS discovery order.
    pub children: Vec<NodeId>,

    /// The edge shared with the parent, `None` for the root.
    pub shared_edge: Option<EdgeKey>,

    /// BFS depth; the root is 0. Assigned exactly once when first visited.
    pub depth: usize,

    /// Hinge anchor: the shared edge's first endpoint position.
    pub pivot: Point3<f64>,

    /// Rotation axis: the shared-edge direction, unit length.
    pub axis: Unit<Vector3<f64>>,

    /// Signed unfold angle in degrees that flattens this face against its
    /// parent's plane.
    pub angle_deg: f64,
}

/// The rooted unfold tree over merged faces.
#[derive(Debug, Clone)]
pub struct UnfoldTree {
    nodes: Vec<UnfoldNode>,
    layers: Vec<Vec<NodeId>>,
    node_of_face: Vec<Option<NodeId>>,
    unreachable: usize,
}

impl UnfoldTree {
    /// The root node id (always the first node created).
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// All nodes, indexed by [`NodeId`].
    #[inline]
    pub fn nodes(&self) -> &[UnfoldNode] {
        &self.nodes
    }

    /// A node by id.
    #[inline]
    pub fn node(&self, id: NodeId) -> &UnfoldNode {
        &self.nodes[id.index()]
    }

    /// A mutable node by id.
    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut UnfoldNode {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes (reachable faces).
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Depth layers: `layers()[d]` holds every node at depth `d`, and
    /// layer 0 holds exactly the root.
    #[inline]
    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    /// The tree node unfolding a face, if the face is reachable.
    #[inline]
    pub fn node_of_face(&self, face: FaceId) -> Option<NodeId> {
        self.node_of_face[face.index()]
    }

    /// Number of faces unreachable from the root.
    #[inline]
    pub fn unreachable_faces(&self) -> usize {
        self.unreachable
    }
}

/// Pick the spanning-tree root face.
///
/// An explicit index is validated against the merged face list; otherwise
/// the face whose centroid is lowest along the world Y axis is chosen,
/// which for most solids yields the natural base face.
pub fn select_root(faces: &[Face], explicit: Option<usize>) -> Result<FaceId> {
    match explicit {
        Some(index) => {
            if index >= faces.len() {
                return Err(UnfoldError::InvalidRootFace {
                    index,
                    num_faces: faces.len(),
                });
            }
            Ok(FaceId::new(index))
        }
        None => {
            let mut best = 0;
            for (fi, face) in faces.iter().enumerate().skip(1) {
                if face.centroid.y < faces[best].centroid.y {
                    best = fi;
                }
            }
            Ok(FaceId::new(best))
        }
    }
}

/// Build the unfold tree by BFS from `root` over the adjacency graph.
///
/// Traversal among multiple unvisited neighbors follows the adjacency
/// list's insertion order, so two runs on the same mesh with the same
/// parameters produce the same tree.
pub fn build_tree(faces: &[Face], graph: &AdjacencyGraph, root: FaceId) -> UnfoldTree {
    let mut nodes: Vec<UnfoldNode> = Vec::with_capacity(faces.len());
    let mut layers: Vec<Vec<NodeId>> = Vec::new();
    let mut node_of_face: Vec<Option<NodeId>> = vec![None; faces.len()];

    let root_node = NodeId::new(0);
    nodes.push(new_node(root, None, None, 0));
    node_of_face[root.index()] = Some(root_node);
    layers.push(vec![root_node]);

    let mut queue = VecDeque::new();
    queue.push_back(root_node);

    while let Some(current) = queue.pop_front() {
        let (face, depth) = (nodes[current.index()].face, nodes[current.index()].depth);
        for &(neighbor, edge) in graph.neighbors(face) {
            if node_of_face[neighbor.index()].is_some() {
                continue;
            }
            let child = NodeId::new(nodes.len());
            nodes.push(new_node(neighbor, Some(current), Some(edge), depth + 1));
            nodes[current.index()].children.push(child);
            node_of_face[neighbor.index()] = Some(child);

            if layers.len() <= depth + 1 {
                layers.push(Vec::new());
            }
            layers[depth + 1].push(child);
            queue.push_back(child);
        }
    }

    let unreachable = faces.len() - nodes.len();
    if unreachable > 0 {
        warn!(
            "{} of {} faces unreachable from root {:?}; they will not animate",
            unreachable,
            faces.len(),
            root
        );
    }
    debug!(
        "unfold tree: {} nodes in {} layers",
        nodes.len(),
        layers.len()
    );

    UnfoldTree {
        nodes,
        layers,
        node_of_face,
        unreachable,
    }
}

fn new_node(
    face: FaceId,
    parent: Option<NodeId>,
    shared_edge: Option<EdgeKey>,
    depth: usize,
) -> UnfoldNode {
    UnfoldNode {
        face,
        parent,
        children: Vec::new(),
        shared_edge,
        depth,
        pivot: Point3::origin(),
        axis: Vector3::x_axis(),
        angle_deg: 0.0,
    }
}
