//! Canonical edge keys.
//!
//! An [`EdgeKey`] identifies an undirected edge between two merged
//! vertices. The endpoints are stored as a canonical (min, max) pair so
//! that the two directed occurrences of an edge hash and compare equal,
//! which makes it usable as the key for every edge-based map in the
//! pipeline.

use nalgebra::Point3;

/// An undirected edge between two merged vertex indices.
///
/// Two raw edges are "the same edge" iff their `EdgeKey`s are equal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EdgeKey {
    v0: u32,
    v1: u32,
}

impl EdgeKey {
    /// Create a canonical edge key from two merged vertex indices.
    ///
    /// The order of the arguments does not matter.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        let (a, b) = (a as u32, b as u32);
        if a <= b {
            Self { v0: a, v1: b }
        } else {
            Self { v0: b, v1: a }
        }
    }

    /// The smaller endpoint index.
    #[inline]
    pub fn v0(self) -> usize {
        self.v0 as usize
    }

    /// The larger endpoint index.
    #[inline]
    pub fn v1(self) -> usize {
        self.v1 as usize
    }

    /// Both endpoint indices as `(v0, v1)`.
    #[inline]
    pub fn endpoints(self) -> (usize, usize) {
        (self.v0 as usize, self.v1 as usize)
    }

    /// Squared length of the edge in the given merged position array.
    #[inline]
    pub fn length_squared(self, positions: &[Point3<f64>]) -> f64 {
        (positions[self.v1 as usize] - positions[self.v0 as usize]).norm_squared()
    }
}
