//! Unfolding pipeline algorithms.
//!
//! This module contains the graph-level stages of the pipeline:
//!
//! - **Planar merging**: union-find clustering of coplanar, edge-adjacent
//!   triangles into logical faces
//! - **Adjacency**: the face-to-face neighbor graph keyed by shared edges
//! - **Spanning tree**: BFS derivation of the rooted unfold tree and its
//!   depth layers
//! - **Hinge solving**: per-edge pivot, axis, and signed unfold angle

pub mod adjacency;
pub mod dsu;
pub mod hinge;
pub mod merge;
pub mod tree;

pub use adjacency::AdjacencyGraph;
pub use dsu::DisjointSet;
pub use hinge::solve_hinges;
pub use merge::merge_coplanar_faces;
pub use tree::{build_tree, select_root, UnfoldNode, UnfoldTree};
