//! # Netfold
//!
//! Automatic mesh unfolding: given an arbitrary triangulated solid,
//! netfold discovers its logical flat faces, derives a spanning tree
//! ("net") rooted at one face, computes the hinge rotation that lays
//! every face flat against its parent, and drives a layered, tick-based
//! unfold/fold animation over the resulting pivot hierarchy.
//!
//! ## Pipeline
//!
//! 1. **Weld** duplicate vertex positions into a canonical set
//! 2. **Extract** one provisional face per non-degenerate triangle
//! 3. **Merge** coplanar, edge-adjacent triangles into planar faces
//! 4. **Connect** faces into an adjacency graph over shared edges
//! 5. **Span** the graph with a BFS tree rooted at the base face
//! 6. **Solve** the hinge pivot, axis, and unfold angle per tree edge
//! 7. **Materialize** the tree as a hierarchy of rotation pivots
//! 8. **Animate** layer by layer, one `tick` per rendered frame
//!
//! Steps 1-7 are a pure function from `(mesh, config)` to an
//! [`Unfolding`]; step 8 is the caller-owned [`UnfoldAnimator`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use netfold::prelude::*;
//! use nalgebra::Point3;
//!
//! # fn positions() -> Vec<Point3<f64>> { vec![] }
//! # fn indices() -> Vec<u32> { vec![] }
//! let mesh = TriangleMesh::new(positions(), indices());
//! let config = UnfoldConfig::default().with_unfold_duration(0.8);
//!
//! let unfolding = Unfolding::build(&mesh, &config).unwrap();
//! println!("faces: {}", unfolding.faces().len());
//! println!("unreachable: {}", unfolding.unreachable_faces());
//!
//! let mut animator = UnfoldAnimator::new(unfolding, &config);
//! animator.toggle_unfold();
//! loop {
//!     animator.tick(1.0 / 60.0); // once per rendered frame
//!     if !animator.is_animating() {
//!         break;
//!     }
//! }
//! assert!(animator.is_unfolded());
//! ```
//!
//! ## Rendering
//!
//! The crate emits geometry only: each pivot carries its face as a
//! double-sided flat polygon in pivot-local space
//! ([`FlatFaceGeometry`](scene::FlatFaceGeometry)), optionally with an
//! ordered boundary loop for outline drawing, and
//! [`PivotHierarchy::world_transform`](scene::PivotHierarchy::world_transform)
//! composes the animated local frames for a renderer or physics layer to
//! consume. Materials, shading, and line drawing are the caller's concern.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod error;
pub mod mesh;
pub mod scene;
mod unfold;

pub use config::UnfoldConfig;
pub use error::{Result, UnfoldError};
pub use scene::{FoldState, UnfoldAnimator};
pub use unfold::Unfolding;

/// Prelude module for convenient imports.
///
/// ```
/// use netfold::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::UnfoldConfig;
    pub use crate::error::{Result, UnfoldError};
    pub use crate::mesh::{EdgeKey, Face, FaceId, NodeId, TriangleMesh};
    pub use crate::scene::{FoldState, UnfoldAnimator};
    pub use crate::unfold::Unfolding;
}

// Re-export nalgebra types for convenience
pub use nalgebra;
