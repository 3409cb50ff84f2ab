//! Face adjacency graph.
//!
//! Computes the face-level neighbor graph over merged faces, keyed by
//! shared edges. This is the graph the spanning-tree builder traverses,
//! distinct from the triangle-level edge map the planar merger uses.
//!
//! Rules, per edge over the merged faces:
//!
//! - exactly two distinct faces: mutual adjacency carrying that edge;
//! - zero or one face: boundary, no entry;
//! - more than two faces: non-manifold, silently ignored here (reported
//!   downstream as unreachable faces if it disconnects the graph);
//! - several edges between the same face pair (common on faceted
//!   surfaces): only the longest is kept, ties going to the first seen.
//!
//! Neighbor lists preserve edge-discovery order, so traversal over the
//! graph is deterministic for a given mesh and configuration.

use std::collections::HashMap;

use nalgebra::Point3;

use crate::mesh::{EdgeKey, Face, FaceId};

/// Face-to-face adjacency over shared edges.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    neighbors: Vec<Vec<(FaceId, EdgeKey)>>,
    num_links: usize,
}

impl AdjacencyGraph {
    /// Build the adjacency graph for a set of merged faces.
    pub fn build(faces: &[Face], positions: &[Point3<f64>]) -> Self {
        // Edge -> faces using it, plus a side list of keys in discovery
        // order (hash-map iteration order is not deterministic).
        let mut edge_map: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
        let mut edge_order: Vec<EdgeKey> = Vec::new();

        for (fi, face) in faces.iter().enumerate() {
            for tri in &face.triangles {
                for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                    let key = EdgeKey::new(a, b);
                    let users = edge_map.entry(key).or_insert_with(|| {
                        edge_order.push(key);
                        Vec::new()
                    });
                    // A face's interior edges appear in two of its own
                    // triangles; count each face once per edge.
                    if users.last() != Some(&fi) {
                        users.push(fi);
                    }
                }
            }
        }

        let mut neighbors: Vec<Vec<(FaceId, EdgeKey)>> = vec![Vec::new(); faces.len()];
        // (low face, high face) -> slots already recorded in each list
        let mut pair_slots: HashMap<(usize, usize), (usize, usize)> = HashMap::new();
        let mut num_links = 0;

        for key in edge_order {
            let users = &edge_map[&key];
            if users.len() != 2 {
                continue;
            }
            let (fa, fb) = (users[0], users[1]);
            if fa == fb {
                continue;
            }

            let pair = (fa.min(fb), fa.max(fb));
            match pair_slots.get(&pair) {
                Some(&(sa, sb)) => {
                    // Same pair already linked: keep only the longest
                    // shared edge, first seen winning ties.
                    let current = neighbors[fa][sa].1;
                    if key.length_squared(positions) > current.length_squared(positions) {
                        neighbors[fa][sa].1 = key;
                        neighbors[fb][sb].1 = key;
                    }
                }
                None => {
                    neighbors[fa].push((FaceId::new(fb), key));
                    neighbors[fb].push((FaceId::new(fa), key));
                    pair_slots.insert(pair, (neighbors[fa].len() - 1, neighbors[fb].len() - 1));
                    num_links += 1;
                }
            }
        }

        Self {
            neighbors,
            num_links,
        }
    }

    /// Number of faces in the graph.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of adjacency links (unordered face pairs).
    #[inline]
    pub fn num_links(&self) -> usize {
        self.num_links
    }

    /// Neighbors of a face, each with the shared edge, in discovery order.
    #[inline]
    pub fn neighbors(&self, face: FaceId) -> &[(FaceId, EdgeKey)] {
        &self.neighbors[face.index()]
    }
}
