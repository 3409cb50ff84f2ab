//! Error types for netfold.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`UnfoldError`].
pub type Result<T> = std::result::Result<T, UnfoldError>;

/// Errors that can occur while building an unfolding.
///
/// Degenerate geometry (zero-area triangles, centroid-on-hinge cases) is
/// *not* an error: it is neutralized locally during the build, since it is
/// expected on real-world meshes. Only conditions that prevent producing
/// any geometry at all are reported here.
#[derive(Error, Debug)]
pub enum UnfoldError {
    /// The input mesh has no triangles.
    #[error("mesh has no triangles")]
    EmptyMesh,

    /// A triangle references a vertex index outside the position array.
    #[error("triangle {triangle} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The triangle index.
        triangle: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// The caller-supplied root face index does not name a merged face.
    #[error("root face index {index} out of range (mesh has {num_faces} faces)")]
    InvalidRootFace {
        /// The requested root face index.
        index: usize,
        /// The number of faces after planar merging.
        num_faces: usize,
    },

    /// Invalid configuration value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl UnfoldError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        UnfoldError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
