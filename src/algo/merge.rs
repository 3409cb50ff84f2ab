//! Planar face merging.
//!
//! Coalesces coplanar, edge-adjacent triangles into logical faces: a
//! cube side's two triangles become one quad face, a cylinder cap's fan
//! becomes one disc face. Clustering is a union-find pass over the
//! triangle-level faces keyed by shared edges.
//!
//! Two edge-adjacent faces are merged when both hold:
//!
//! 1. the angle between their normals is at most the configured merge
//!    angle (compared via cosines), and
//! 2. the point-to-plane distance from one face's centroid to the other's
//!    plane is below a tight tolerance.
//!
//! The second gate keeps triangles that merely face the same way but lie
//! on different parallel planes apart.

use std::collections::HashMap;

use nalgebra::Point3;

use crate::mesh::{triangle_normal, EdgeKey, Face};

use super::dsu::DisjointSet;

/// Merge coplanar, edge-adjacent faces into planar clusters.
///
/// Output face ids (list positions) are reassigned densely in cluster
/// order, where clusters are ordered by their first member's id.
///
/// Threshold values near 0 degrade to "no merging" and values near 180 to
/// "merge everything"; both are valid, caller-controlled outcomes.
pub fn merge_coplanar_faces(
    faces: &[Face],
    positions: &[Point3<f64>],
    angle_threshold_deg: f64,
    plane_tolerance: f64,
) -> Vec<Face> {
    if faces.is_empty() {
        return Vec::new();
    }

    // Edge -> triangle-level faces sharing it
    let mut edge_map: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
    for (fi, face) in faces.iter().enumerate() {
        for tri in &face.triangles {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                edge_map.entry(EdgeKey::new(a, b)).or_default().push(fi);
            }
        }
    }

    let cos_threshold = angle_threshold_deg.to_radians().cos();
    let mut dsu = DisjointSet::new(faces.len());

    for users in edge_map.values() {
        for (i, &fa) in users.iter().enumerate() {
            for &fb in &users[i + 1..] {
                if fa == fb || dsu.same_set(fa, fb) {
                    continue;
                }
                let a = &faces[fa];
                let b = &faces[fb];
                if a.normal.dot(&b.normal) < cos_threshold {
                    continue;
                }
                if a.plane_distance(&b.centroid).abs() > plane_tolerance {
                    continue;
                }
                dsu.union(fa, fb);
            }
        }
    }

    rebuild_clusters(faces, positions, &mut dsu)
}

/// Rebuild one face per union-find cluster.
fn rebuild_clusters(
    faces: &[Face],
    positions: &[Point3<f64>],
    dsu: &mut DisjointSet,
) -> Vec<Face> {
    // Cluster order = order of first appearance by member id, which keeps
    // the output deterministic regardless of hash-map iteration order.
    let mut cluster_of_root: HashMap<usize, usize> = HashMap::new();
    let mut clusters: Vec<Vec<usize>> = Vec::new();
    for fi in 0..faces.len() {
        let root = dsu.find(fi);
        let ci = *cluster_of_root.entry(root).or_insert_with(|| {
            clusters.push(Vec::new());
            clusters.len() - 1
        });
        clusters[ci].push(fi);
    }

    clusters
        .into_iter()
        .map(|members| {
            let mut triangles = Vec::new();
            let mut vertices = Vec::new();
            for &fi in &members {
                triangles.extend_from_slice(&faces[fi].triangles);
                vertices.extend_from_slice(&faces[fi].vertices);
            }
            vertices.sort_unstable();
            vertices.dedup();

            let mut centroid = Point3::origin();
            for &v in &vertices {
                centroid.coords += positions[v].coords;
            }
            centroid.coords /= vertices.len() as f64;

            // Recomputed from the first triangle rather than averaged, to
            // avoid drift on slightly noisy meshes.
            let normal = triangle_normal(triangles[0], positions)
                .unwrap_or(faces[members[0]].normal);

            Face {
                triangles,
                normal,
                centroid,
                vertices,
            }
        })
        .collect()
}
