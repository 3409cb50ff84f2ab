//! Renderable flat-face geometry.
//!
//! Each face of the net is exported as a double-sided polygon in its
//! pivot's local space: the front side keeps the face's winding and
//! normal, the back side mirrors the winding with the normal inverted, so
//! an unfolded net reads correctly from both sides.
//!
//! When requested, an outline is extracted from the face's boundary edges
//! (edges used by exactly one of its triangles). The walk assumes the
//! boundary is one simple cycle; if it is not (a face with holes), the
//! outline degrades to an unordered edge list and a renderer draws each
//! segment independently.

use std::collections::HashMap;

use nalgebra::{Point3, Unit, Vector3};

use crate::mesh::{EdgeKey, Face};

/// The outline of a face, in local vertex indices.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryOutline {
    /// Outline extraction was disabled.
    None,

    /// A single simple cycle; consecutive entries (and last-to-first) are
    /// the outline edges.
    Loop(Vec<usize>),

    /// The boundary is not one simple cycle; each entry is an independent
    /// edge.
    Segments(Vec<(usize, usize)>),
}

/// A face's flat polygon geometry, in the owning pivot's local space.
#[derive(Debug, Clone)]
pub struct FlatFaceGeometry {
    /// The face's unique vertex positions, relative to the pivot origin.
    pub vertices: Vec<Point3<f64>>,

    /// Front-side triangles as index triples into `vertices`.
    pub front: Vec<[usize; 3]>,

    /// Back-side triangles: mirrored winding of `front`.
    pub back: Vec<[usize; 3]>,

    /// Front-side unit normal (the face's computed normal).
    pub normal: Unit<Vector3<f64>>,

    /// The face outline for boundary-edge rendering.
    pub boundary: BoundaryOutline,
}

impl FlatFaceGeometry {
    /// Build the double-sided geometry for a face.
    ///
    /// `origin` is the pivot's position in mesh space; all exported
    /// vertices are made relative to it.
    pub fn build(
        face: &Face,
        positions: &[Point3<f64>],
        origin: &Point3<f64>,
        extract_boundary: bool,
    ) -> Self {
        // face.vertices is sorted, so merged ids remap by binary search
        let vertices: Vec<Point3<f64>> = face
            .vertices
            .iter()
            .map(|&v| Point3::from(positions[v] - origin))
            .collect();
        let local = |v: usize| -> usize {
            // Every triangle vertex is in the face's vertex set by construction
            face.vertices
                .binary_search(&v)
                .expect("triangle vertex missing from face vertex set")
        };

        let front: Vec<[usize; 3]> = face
            .triangles
            .iter()
            .map(|&[a, b, c]| [local(a), local(b), local(c)])
            .collect();
        let back: Vec<[usize; 3]> = front.iter().map(|&[a, b, c]| [a, c, b]).collect();

        let boundary = if extract_boundary {
            extract_outline(face, &front)
        } else {
            BoundaryOutline::None
        };

        Self {
            vertices,
            front,
            back,
            normal: face.normal,
            boundary,
        }
    }

    /// The back-side unit normal.
    #[inline]
    pub fn back_normal(&self) -> Unit<Vector3<f64>> {
        Unit::new_unchecked(-self.normal.into_inner())
    }
}

/// Collect the face's boundary edges and order them into a loop if the
/// boundary is one simple cycle.
fn extract_outline(face: &Face, local_triangles: &[[usize; 3]]) -> BoundaryOutline {
    // Boundary edge = used by exactly one triangle of this face. Keys use
    // local indices; a side list keeps discovery order deterministic.
    let mut counts: HashMap<EdgeKey, usize> = HashMap::new();
    let mut order: Vec<EdgeKey> = Vec::new();
    for tri in local_triangles {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = EdgeKey::new(a, b);
            let count = counts.entry(key).or_insert_with(|| {
                order.push(key);
                0
            });
            *count += 1;
        }
    }

    let boundary: Vec<EdgeKey> = order
        .into_iter()
        .filter(|key| counts[key] == 1)
        .collect();
    if boundary.is_empty() {
        return BoundaryOutline::Segments(Vec::new());
    }

    // Vertex -> incident boundary edges
    let mut incident: HashMap<usize, Vec<EdgeKey>> = HashMap::new();
    for &edge in &boundary {
        incident.entry(edge.v0()).or_default().push(edge);
        incident.entry(edge.v1()).or_default().push(edge);
    }

    // Walk from an arbitrary boundary edge, following the unvisited
    // continuation at each vertex until none exists.
    let mut visited: HashMap<EdgeKey, bool> = boundary.iter().map(|&e| (e, false)).collect();
    let start = boundary[0];
    let mut walk = vec![start.v0(), start.v1()];
    visited.insert(start, true);

    let mut cursor = start.v1();
    loop {
        let next = incident[&cursor].iter().copied().find(|e| !visited[e]);
        match next {
            Some(edge) => {
                visited.insert(edge, true);
                cursor = if edge.v0() == cursor { edge.v1() } else { edge.v0() };
                walk.push(cursor);
            }
            None => break,
        }
    }

    let closed = walk.len() > 2 && walk.first() == walk.last();
    let all_visited = visited.values().all(|&v| v);
    if closed && all_visited {
        walk.pop(); // drop the repeated start vertex
        BoundaryOutline::Loop(walk)
    } else {
        BoundaryOutline::Segments(boundary.iter().map(|e| e.endpoints()).collect())
    }
}
