//! Vertex welding.
//!
//! Raw triangle meshes commonly duplicate vertex positions (one copy per
//! incident face, as exported by most modeling tools). Welding merges
//! duplicates into a canonical vertex set so that shared edges become
//! discoverable by index comparison alone.
//!
//! The weld uses a grid-snap hash: each coordinate is quantized to a cell
//! of size `epsilon`, and the integer cell triple is the hash key. The
//! first vertex to claim a cell becomes its canonical vertex; later
//! vertices hashing to the same cell are remapped to it.

use std::collections::HashMap;

use nalgebra::Point3;

/// Result of welding a raw vertex array.
#[derive(Debug, Clone)]
pub struct WeldedVertices {
    /// The canonical (deduplicated) vertex positions, in first-seen order.
    pub positions: Vec<Point3<f64>>,

    /// Map from raw vertex index to merged vertex index.
    pub remap: Vec<usize>,
}

impl WeldedVertices {
    /// Number of merged vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the merged set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Merge duplicate-position vertices into a canonical vertex set.
///
/// Two raw vertices map to the same merged index iff they quantize to the
/// same grid cell of size `epsilon`. A pathologically large epsilon
/// over-merges silently; that is a caller-tuning concern, not a fault.
///
/// # Example
///
/// ```
/// use netfold::mesh::weld_vertices;
/// use nalgebra::Point3;
///
/// let raw = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 0.0), // duplicate of vertex 0
/// ];
/// let welded = weld_vertices(&raw, 1e-4);
/// assert_eq!(welded.len(), 2);
/// assert_eq!(welded.remap, vec![0, 1, 0]);
/// ```
pub fn weld_vertices(positions: &[Point3<f64>], epsilon: f64) -> WeldedVertices {
    let mut cells: HashMap<(i64, i64, i64), usize> = HashMap::with_capacity(positions.len());
    let mut merged = Vec::with_capacity(positions.len());
    let mut remap = Vec::with_capacity(positions.len());

    let inv = 1.0 / epsilon;
    for p in positions {
        let cell = (
            (p.x * inv).round() as i64,
            (p.y * inv).round() as i64,
            (p.z * inv).round() as i64,
        );
        let id = *cells.entry(cell).or_insert_with(|| {
            merged.push(*p);
            merged.len() - 1
        });
        remap.push(id);
    }

    WeldedVertices {
        positions: merged,
        remap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weld_idempotence() {
        // A vertex set with no duplicates welds to itself
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let welded = weld_vertices(&positions, 1e-4);

        assert_eq!(welded.len(), positions.len());
        assert_eq!(welded.remap, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_weld_duplicates() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ];
        let welded = weld_vertices(&positions, 1e-4);

        assert_eq!(welded.len(), 2);
        assert_eq!(welded.remap, vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_weld_near_coincident() {
        // Positions closer than epsilon land in the same grid cell
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1e-6, -1e-6, 0.0),
        ];
        let welded = weld_vertices(&positions, 1e-4);
        assert_eq!(welded.len(), 1);
    }

    #[test]
    fn test_weld_keeps_first_position() {
        let positions = vec![
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(1.0, 2.0, 3.0),
        ];
        let welded = weld_vertices(&positions, 1e-4);
        assert_eq!(welded.positions[0], Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_weld_empty() {
        let welded = weld_vertices(&[], 1e-4);
        assert!(welded.is_empty());
        assert!(welded.remap.is_empty());
    }
}
