//! Layer-ordered unfold/fold animation.
//!
//! The animator is the only stateful component of the crate. It owns a
//! built [`Unfolding`] and advances transitions via discrete
//! [`tick`](UnfoldAnimator::tick) calls from the host's frame clock; a
//! tick boundary is the sole suspension point.
//!
//! Transitions process depth layers strictly in order: unfolding walks
//! layers 1..n, folding walks them in reverse, and a layer's pivots are
//! snapped to their exact end rotation before the next layer starts, so a
//! child only flattens once its parent has. Requests made while a
//! transition is in flight are ignored; the only cancellation path is
//! [`rebuild`](UnfoldAnimator::rebuild), which tears down all state.

use crate::config::UnfoldConfig;
use crate::error::Result;
use crate::mesh::{NodeId, TriangleMesh};
use crate::unfold::Unfolding;

/// The animation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldState {
    /// Every pivot at identity rotation.
    Folded,
    /// Interpolating layers toward their unfold targets.
    Unfolding,
    /// Every pivot at its target rotation.
    Unfolded,
    /// Interpolating layers back toward identity.
    Folding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Unfold,
    Fold,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Interpolating { elapsed: f64 },
    Delay { remaining: f64 },
}

#[derive(Debug, Clone)]
struct Transition {
    direction: Direction,
    /// Depth-layer indices still to process, front first.
    layer_queue: Vec<usize>,
    cursor: usize,
    phase: Phase,
}

/// Drives layered, interruptible-only-by-rebuild unfold/fold transitions.
pub struct UnfoldAnimator {
    unfolding: Unfolding,
    duration: f64,
    layer_delay: f64,
    state: FoldState,
    transition: Option<Transition>,
}

impl UnfoldAnimator {
    /// Wrap a built unfolding, taking pacing from the config.
    ///
    /// The initial state is [`FoldState::Folded`] with every pivot at
    /// identity rotation.
    pub fn new(unfolding: Unfolding, config: &UnfoldConfig) -> Self {
        Self {
            unfolding,
            duration: config.unfold_duration_seconds,
            layer_delay: config.inter_layer_delay_seconds,
            state: FoldState::Folded,
            transition: None,
        }
    }

    /// The wrapped unfolding (faces, tree, pivot hierarchy).
    #[inline]
    pub fn unfolding(&self) -> &Unfolding {
        &self.unfolding
    }

    /// Current state-machine state.
    #[inline]
    pub fn state(&self) -> FoldState {
        self.state
    }

    /// Whether the net is fully unfolded.
    #[inline]
    pub fn is_unfolded(&self) -> bool {
        self.state == FoldState::Unfolded
    }

    /// Whether a transition is in flight.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Start unfolding when folded, or folding when unfolded.
    ///
    /// Returns `false` (and does nothing) while a transition is already
    /// running.
    pub fn toggle_unfold(&mut self) -> bool {
        if self.is_animating() {
            return false;
        }
        match self.state {
            FoldState::Folded => self.start(Direction::Unfold),
            FoldState::Unfolded => self.start(Direction::Fold),
            // Unreachable without an active transition, but harmless
            FoldState::Unfolding | FoldState::Folding => return false,
        }
        true
    }

    /// Snap every pivot to its target rotation with no interpolation.
    ///
    /// Rejected (returns `false`) while a transition is in flight.
    pub fn set_unfolded_immediate(&mut self) -> bool {
        if self.is_animating() {
            return false;
        }
        let hierarchy = self.unfolding.hierarchy_mut();
        for id in 0..hierarchy.len() {
            hierarchy.set_fraction(NodeId::new(id), 1.0);
        }
        self.state = FoldState::Unfolded;
        true
    }

    /// Snap every pivot back to identity rotation with no interpolation.
    ///
    /// Rejected (returns `false`) while a transition is in flight.
    pub fn set_folded_immediate(&mut self) -> bool {
        if self.is_animating() {
            return false;
        }
        self.unfolding.hierarchy_mut().reset();
        self.state = FoldState::Folded;
        true
    }

    /// Tear down all pivot and transition state and rebuild from scratch.
    ///
    /// This is the only cancellation path: it discards any in-flight
    /// transition unconditionally. The new build starts folded.
    pub fn rebuild(&mut self, mesh: &TriangleMesh, config: &UnfoldConfig) -> Result<()> {
        let unfolding = Unfolding::build(mesh, config)?;
        self.unfolding = unfolding;
        self.duration = config.unfold_duration_seconds;
        self.layer_delay = config.inter_layer_delay_seconds;
        self.state = FoldState::Folded;
        self.transition = None;
        Ok(())
    }

    /// Advance an in-flight transition by `delta_seconds`.
    ///
    /// A no-op when nothing is animating. The host calls this once per
    /// rendered frame; if the host clock stalls, the transition stalls
    /// with it.
    pub fn tick(&mut self, delta_seconds: f64) {
        let Some(mut transition) = self.transition.take() else {
            return;
        };

        match transition.phase {
            Phase::Delay { remaining } => {
                let remaining = remaining - delta_seconds;
                if remaining > 0.0 {
                    transition.phase = Phase::Delay { remaining };
                    self.transition = Some(transition);
                } else {
                    transition.phase = Phase::Interpolating { elapsed: 0.0 };
                    self.transition = Some(transition);
                }
            }
            Phase::Interpolating { elapsed } => {
                let elapsed = elapsed + delta_seconds;
                let t = if self.duration > 0.0 {
                    (elapsed / self.duration).min(1.0)
                } else {
                    1.0
                };
                let layer = transition.layer_queue[transition.cursor];
                self.apply_layer(layer, transition.direction, smoothstep(t));

                if t < 1.0 {
                    transition.phase = Phase::Interpolating { elapsed };
                    self.transition = Some(transition);
                    return;
                }

                // Layer complete: pivots were snapped to the exact end
                // rotation by the t == 1 application above
                transition.cursor += 1;
                if transition.cursor >= transition.layer_queue.len() {
                    self.finish(transition.direction);
                    return;
                }
                transition.phase = if self.layer_delay > 0.0 {
                    Phase::Delay {
                        remaining: self.layer_delay,
                    }
                } else {
                    Phase::Interpolating { elapsed: 0.0 }
                };
                self.transition = Some(transition);
            }
        }
    }

    fn start(&mut self, direction: Direction) {
        let num_layers = self.unfolding.tree().layers().len();
        // Layer 0 is the static root
        let layer_queue: Vec<usize> = match direction {
            Direction::Unfold => (1..num_layers).collect(),
            Direction::Fold => (1..num_layers).rev().collect(),
        };
        if layer_queue.is_empty() {
            // Nothing to animate (single-face net): complete instantly
            self.finish(direction);
            return;
        }
        self.state = match direction {
            Direction::Unfold => FoldState::Unfolding,
            Direction::Fold => FoldState::Folding,
        };
        self.transition = Some(Transition {
            direction,
            layer_queue,
            cursor: 0,
            phase: Phase::Interpolating { elapsed: 0.0 },
        });
    }

    fn finish(&mut self, direction: Direction) {
        self.transition = None;
        self.state = match direction {
            Direction::Unfold => FoldState::Unfolded,
            Direction::Fold => FoldState::Folded,
        };
    }

    /// Set every pivot in a depth layer to the eased fraction.
    fn apply_layer(&mut self, layer: usize, direction: Direction, eased: f64) {
        let fraction = match direction {
            Direction::Unfold => eased,
            Direction::Fold => 1.0 - eased,
        };
        let layer_nodes = self.unfolding.tree().layers()[layer].clone();
        let hierarchy = self.unfolding.hierarchy_mut();
        for id in layer_nodes {
            hierarchy.set_fraction(id, fraction);
        }
    }
}

impl std::fmt::Debug for UnfoldAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnfoldAnimator")
            .field("state", &self.state)
            .field("animating", &self.is_animating())
            .finish_non_exhaustive()
    }
}

/// Hermite easing over [0, 1].
#[inline]
fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, UnitQuaternion};

    /// A unit cube as 12 raw triangles with duplicated corner vertices.
    fn cube_mesh() -> TriangleMesh {
        crate::test_fixtures::unit_cube()
    }

    fn animator(config: UnfoldConfig) -> UnfoldAnimator {
        let unfolding = Unfolding::build(&cube_mesh(), &config).unwrap();
        UnfoldAnimator::new(unfolding, &config)
    }

    #[test]
    fn test_initial_state_folded() {
        let anim = animator(UnfoldConfig::default());
        assert_eq!(anim.state(), FoldState::Folded);
        assert!(!anim.is_unfolded());
        assert!(!anim.is_animating());
    }

    #[test]
    fn test_immediate_round_trip_restores_identity() {
        let mut anim = animator(UnfoldConfig::default());

        assert!(anim.set_unfolded_immediate());
        assert!(anim.is_unfolded());
        for pivot in anim.unfolding().hierarchy().pivots() {
            let expected = pivot.rotation_at(1.0);
            assert_eq!(pivot.rotation, expected);
        }

        assert!(anim.set_folded_immediate());
        assert_eq!(anim.state(), FoldState::Folded);
        for pivot in anim.unfolding().hierarchy().pivots() {
            assert_eq!(pivot.rotation, UnitQuaternion::identity());
        }
    }

    #[test]
    fn test_unfold_then_fold_via_ticks() {
        let config = UnfoldConfig::default()
            .with_unfold_duration(0.1)
            .with_inter_layer_delay(0.05);
        let mut anim = animator(config);

        assert!(anim.toggle_unfold());
        assert_eq!(anim.state(), FoldState::Unfolding);
        assert!(!anim.toggle_unfold(), "request during transition must be ignored");
        assert!(!anim.set_unfolded_immediate());
        assert!(!anim.set_folded_immediate());

        let mut guard = 0;
        while anim.is_animating() {
            anim.tick(0.016);
            guard += 1;
            assert!(guard < 10_000, "unfold transition never completed");
        }
        assert!(anim.is_unfolded());

        // Every non-root pivot sits exactly at its target rotation
        for (i, pivot) in anim.unfolding().hierarchy().pivots().iter().enumerate() {
            if i == 0 {
                continue;
            }
            assert_eq!(pivot.rotation, pivot.rotation_at(1.0));
        }

        assert!(anim.toggle_unfold());
        assert_eq!(anim.state(), FoldState::Folding);
        while anim.is_animating() {
            anim.tick(0.016);
        }
        assert_eq!(anim.state(), FoldState::Folded);
        for pivot in anim.unfolding().hierarchy().pivots() {
            assert_eq!(pivot.rotation, UnitQuaternion::identity());
        }
    }

    #[test]
    fn test_layers_complete_in_depth_order() {
        let config = UnfoldConfig::default().with_unfold_duration(0.1);
        let mut anim = animator(config);
        anim.toggle_unfold();

        let layers: Vec<Vec<NodeId>> = anim.unfolding().tree().layers().to_vec();
        assert!(layers.len() >= 3, "cube should have at least two layers past the root");

        let mut deeper_started_before_shallow_done = false;
        let mut guard = 0;
        while anim.is_animating() {
            anim.tick(0.016);
            guard += 1;
            assert!(guard < 10_000);

            let hierarchy = anim.unfolding().hierarchy();
            let layer1_done = layers[1]
                .iter()
                .all(|&id| hierarchy.pivot(id).rotation == hierarchy.pivot(id).rotation_at(1.0));
            let layer2_moving = layers[2]
                .iter()
                .any(|&id| hierarchy.pivot(id).rotation != UnitQuaternion::identity());
            if layer2_moving && !layer1_done {
                deeper_started_before_shallow_done = true;
            }
        }
        assert!(!deeper_started_before_shallow_done);
    }

    #[test]
    fn test_zero_duration_snaps_layer_per_tick() {
        let config = UnfoldConfig::default().with_unfold_duration(0.0);
        let mut anim = animator(config);
        anim.toggle_unfold();

        let num_layers = anim.unfolding().tree().layers().len() - 1;
        for _ in 0..num_layers {
            assert!(anim.is_animating());
            anim.tick(0.016);
        }
        assert!(anim.is_unfolded());
    }

    #[test]
    fn test_rebuild_cancels_transition() {
        let config = UnfoldConfig::default().with_unfold_duration(1.0);
        let mut anim = animator(config.clone());
        anim.toggle_unfold();
        anim.tick(0.016);
        assert!(anim.is_animating());

        anim.rebuild(&cube_mesh(), &config).unwrap();
        assert!(!anim.is_animating());
        assert_eq!(anim.state(), FoldState::Folded);
        for pivot in anim.unfolding().hierarchy().pivots() {
            assert_eq!(pivot.rotation, UnitQuaternion::identity());
        }
    }

    #[test]
    fn test_single_face_net_toggles_instantly() {
        let mesh = TriangleMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
            ],
            vec![0, 1, 2],
        );
        let config = UnfoldConfig::default();
        let unfolding = Unfolding::build(&mesh, &config).unwrap();
        let mut anim = UnfoldAnimator::new(unfolding, &config);

        assert!(anim.toggle_unfold());
        assert!(anim.is_unfolded());
        assert!(!anim.is_animating());
    }
}
