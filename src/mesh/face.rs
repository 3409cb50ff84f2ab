//! Logical faces and triangle-level face extraction.
//!
//! A [`Face`] is a planar cluster of triangles treated as one logical
//! polygon: before merging, one per input triangle; after the planar
//! merge pass, one per coplanar cluster. Faces are addressed by their
//! position in the owning face list (see
//! [`FaceId`](crate::mesh::FaceId)), reassigned densely on every pass.

use nalgebra::{Point3, Unit, Vector3};
use rayon::prelude::*;

/// Tolerance below which a cross product is considered zero-area.
const NORMAL_EPSILON: f64 = 1e-12;

/// A logical flat face: one or more triangles sharing a plane.
#[derive(Debug, Clone)]
pub struct Face {
    /// Index triples into the merged vertex array.
    pub triangles: Vec<[usize; 3]>,

    /// Unit face normal, computed from the first triangle.
    pub normal: Unit<Vector3<f64>>,

    /// Mean of the face's unique vertex positions (not area-weighted).
    pub centroid: Point3<f64>,

    /// Sorted, deduplicated merged vertex indices used by this face.
    pub vertices: Vec<usize>,
}

impl Face {
    /// Build a single-triangle face.
    ///
    /// Returns `None` if the triangle is degenerate: any two indices
    /// equal, or a near-zero cross product (collinear vertices).
    pub fn from_triangle(tri: [usize; 3], positions: &[Point3<f64>]) -> Option<Self> {
        let [a, b, c] = tri;
        if a == b || b == c || a == c {
            return None;
        }

        let normal = triangle_normal(tri, positions)?;
        let centroid = Point3::from(
            (positions[a].coords + positions[b].coords + positions[c].coords) / 3.0,
        );

        let mut vertices = vec![a, b, c];
        vertices.sort_unstable();

        Some(Self {
            triangles: vec![tri],
            normal,
            centroid,
            vertices,
        })
    }

    /// Signed-distance of a point to this face's plane.
    #[inline]
    pub fn plane_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&(point - self.centroid))
    }
}

/// Unit normal of a triangle, or `None` if it is (near-)zero-area.
pub fn triangle_normal(tri: [usize; 3], positions: &[Point3<f64>]) -> Option<Unit<Vector3<f64>>> {
    let [a, b, c] = tri;
    let cross = (positions[b] - positions[a]).cross(&(positions[c] - positions[a]));
    Unit::try_new(cross, NORMAL_EPSILON)
}

/// Turn remapped triangle index triples into single-triangle faces.
///
/// Degenerate triangles (duplicate merged indices or near-zero area) are
/// dropped, so the output may be shorter than the input. Face ids are the
/// positions in the returned list.
pub fn extract_faces(
    triangles: &[[usize; 3]],
    positions: &[Point3<f64>],
    parallel: bool,
) -> Vec<Face> {
    if parallel {
        triangles
            .par_iter()
            .filter_map(|&tri| Face::from_triangle(tri, positions))
            .collect()
    } else {
        triangles
            .iter()
            .filter_map(|&tri| Face::from_triangle(tri, positions))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_positions() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_single_triangle_face() {
        let positions = square_positions();
        let face = Face::from_triangle([0, 1, 2], &positions).unwrap();

        assert_eq!(face.triangles, vec![[0, 1, 2]]);
        assert_eq!(face.vertices, vec![0, 1, 2]);
        // CCW in the XY plane: normal is +Z
        assert!((face.normal.z - 1.0).abs() < 1e-12);
        assert!((face.centroid.x - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_duplicate_index() {
        let positions = square_positions();
        assert!(Face::from_triangle([0, 0, 2], &positions).is_none());
        assert!(Face::from_triangle([1, 2, 1], &positions).is_none());
    }

    #[test]
    fn test_degenerate_collinear() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert!(Face::from_triangle([0, 1, 2], &positions).is_none());
    }

    #[test]
    fn test_extract_drops_degenerates() {
        let positions = square_positions();
        let triangles = vec![[0, 1, 2], [0, 2, 2], [0, 2, 3]];

        let faces = extract_faces(&triangles, &positions, false);
        assert_eq!(faces.len(), 2);
    }

    #[test]
    fn test_extract_parallel_matches_sequential() {
        let positions = square_positions();
        let triangles = vec![[0, 1, 2], [0, 2, 3], [1, 1, 3]];

        let seq = extract_faces(&triangles, &positions, false);
        let par = extract_faces(&triangles, &positions, true);

        assert_eq!(seq.len(), par.len());
        for (a, b) in seq.iter().zip(par.iter()) {
            assert_eq!(a.triangles, b.triangles);
        }
    }

    #[test]
    fn test_plane_distance() {
        let positions = square_positions();
        let face = Face::from_triangle([0, 1, 2], &positions).unwrap();
        let above = Point3::new(0.5, 0.5, 2.0);
        assert!((face.plane_distance(&above) - 2.0).abs() < 1e-12);
    }
}
