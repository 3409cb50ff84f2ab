//! Configuration for the unfolding pipeline.
//!
//! All tunables live in a single [`UnfoldConfig`] value that is passed to
//! [`Unfolding::build`](crate::Unfolding::build) and to the animator. The
//! geometric parameters are validated at build entry; animation pacing and
//! presentation hints are taken as-is.

use crate::error::{Result, UnfoldError};

/// Options controlling mesh unfolding and animation pacing.
///
/// # Example
///
/// ```
/// use netfold::UnfoldConfig;
///
/// let config = UnfoldConfig::default()
///     .with_merge_angle(10.0)
///     .with_root_face(0)
///     .with_unfold_duration(0.5);
/// ```
#[derive(Debug, Clone)]
pub struct UnfoldConfig {
    /// Distance tolerance for identifying two raw vertices as the same
    /// point (grid cell size of the weld hash).
    pub weld_epsilon: f64,

    /// Maximum angle in degrees between two face normals for their
    /// triangles to be merged into one planar face. Valid range (0, 45].
    pub merge_angle_threshold_deg: f64,

    /// Explicit root face index for the spanning tree. `None` selects the
    /// face whose centroid is lowest along the world Y axis, which for
    /// most solids yields the natural base face.
    pub root_face: Option<usize>,

    /// Duration of one layer's unfold/fold interpolation, in seconds.
    pub unfold_duration_seconds: f64,

    /// Pause between consecutive depth layers, in seconds.
    pub inter_layer_delay_seconds: f64,

    /// Whether boundary-edge outlines should be extracted for rendering.
    pub show_boundary_edges: bool,

    /// Outline width hint for the presentation layer.
    pub boundary_edge_width: f64,

    /// Outline color hint (RGBA) for the presentation layer.
    pub boundary_edge_color: [f32; 4],

    /// Whether to use parallel execution for per-triangle passes.
    pub parallel: bool,
}

impl Default for UnfoldConfig {
    fn default() -> Self {
        Self {
            weld_epsilon: 1e-4,
            merge_angle_threshold_deg: 5.0,
            root_face: None,
            unfold_duration_seconds: 1.0,
            inter_layer_delay_seconds: 0.0,
            show_boundary_edges: true,
            boundary_edge_width: 1.0,
            boundary_edge_color: [0.0, 0.0, 0.0, 1.0],
            parallel: true,
        }
    }
}

impl UnfoldConfig {
    /// Set the vertex weld epsilon.
    pub fn with_weld_epsilon(mut self, epsilon: f64) -> Self {
        self.weld_epsilon = epsilon;
        self
    }

    /// Set the planar merge angle threshold in degrees.
    pub fn with_merge_angle(mut self, degrees: f64) -> Self {
        self.merge_angle_threshold_deg = degrees;
        self
    }

    /// Set an explicit root face for the spanning tree.
    pub fn with_root_face(mut self, face: usize) -> Self {
        self.root_face = Some(face);
        self
    }

    /// Set the per-layer unfold duration in seconds.
    pub fn with_unfold_duration(mut self, seconds: f64) -> Self {
        self.unfold_duration_seconds = seconds;
        self
    }

    /// Set the pause between depth layers in seconds.
    pub fn with_inter_layer_delay(mut self, seconds: f64) -> Self {
        self.inter_layer_delay_seconds = seconds;
        self
    }

    /// Disable boundary-edge outline extraction.
    pub fn without_boundary_edges(mut self) -> Self {
        self.show_boundary_edges = false;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// The point-to-plane tolerance used by the planar merger.
    ///
    /// Kept deliberately tight (100x the weld epsilon) so that parallel
    /// but non-coplanar faces, e.g. the two sides of a thin slab, are
    /// never merged.
    pub fn plane_tolerance(&self) -> f64 {
        self.weld_epsilon * 100.0
    }

    /// Validate the geometric parameters.
    pub fn validate(&self) -> Result<()> {
        if !self.weld_epsilon.is_finite() || self.weld_epsilon <= 0.0 {
            return Err(UnfoldError::invalid_param(
                "weld_epsilon",
                self.weld_epsilon,
                "must be finite and positive",
            ));
        }
        if !self.merge_angle_threshold_deg.is_finite()
            || self.merge_angle_threshold_deg <= 0.0
            || self.merge_angle_threshold_deg > 45.0
        {
            return Err(UnfoldError::invalid_param(
                "merge_angle_threshold_deg",
                self.merge_angle_threshold_deg,
                "must be in (0, 45]",
            ));
        }
        if !self.unfold_duration_seconds.is_finite() || self.unfold_duration_seconds < 0.0 {
            return Err(UnfoldError::invalid_param(
                "unfold_duration_seconds",
                self.unfold_duration_seconds,
                "must be finite and non-negative",
            ));
        }
        if !self.inter_layer_delay_seconds.is_finite() || self.inter_layer_delay_seconds < 0.0 {
            return Err(UnfoldError::invalid_param(
                "inter_layer_delay_seconds",
                self.inter_layer_delay_seconds,
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(UnfoldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_chaining() {
        let config = UnfoldConfig::default()
            .with_merge_angle(12.0)
            .with_root_face(3)
            .with_unfold_duration(0.25)
            .with_inter_layer_delay(0.1)
            .sequential();

        assert_eq!(config.merge_angle_threshold_deg, 12.0);
        assert_eq!(config.root_face, Some(3));
        assert_eq!(config.unfold_duration_seconds, 0.25);
        assert_eq!(config.inter_layer_delay_seconds, 0.1);
        assert!(!config.parallel);
    }

    #[test]
    fn test_invalid_merge_angle() {
        let config = UnfoldConfig::default().with_merge_angle(90.0);
        assert!(config.validate().is_err());

        let config = UnfoldConfig::default().with_merge_angle(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_epsilon() {
        let config = UnfoldConfig::default().with_weld_epsilon(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_plane_tolerance_tracks_epsilon() {
        let config = UnfoldConfig::default().with_weld_epsilon(1e-3);
        assert!((config.plane_tolerance() - 0.1).abs() < 1e-12);
    }
}
