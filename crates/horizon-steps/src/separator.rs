//! Squeeze animation of the separators between steps.
//!
//! Each separator owns a [`SeparatorAnimator`] bound to its position. When
//! the current index moves by exactly one step, the separator being left
//! (advancing) or entered (retreating) squeezes horizontally to the
//! configured minimum scale, then decays back to full width after one
//! animation duration. Larger jumps are not animated with the squeeze.
//!
//! A decay check is never cancelled. It only applies while the separator
//! still shows the scale it captured and no newer transition has re-armed
//! the decay, so stale checks fall through harmlessly. A squeeze that is
//! re-entered before its decay therefore restarts the decay delay.

use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use horizon_steps_core::logging::targets;
use horizon_steps_core::{Clock, ConnectionGuard, TaskScheduler};
use parking_lot::Mutex;

use crate::animation::Tween;
use crate::config::StepsConfig;
use crate::state::ProgressionState;

/// Target scale of the separator at `index` for a move from `previous` to
/// `next`.
///
/// ```
/// use horizon_steps::separator::target_scale;
///
/// assert_eq!(target_scale(1, 1, 2, 0.25), 0.25); // leaving while advancing
/// assert_eq!(target_scale(1, 2, 1, 0.25), 0.25); // entering while retreating
/// assert_eq!(target_scale(1, 0, 1, 0.25), 1.0);
/// assert_eq!(target_scale(1, 1, 3, 0.25), 1.0); // jumps are not squeezed
/// ```
pub fn target_scale(index: usize, previous: usize, next: usize, min_scale: f32) -> f32 {
    let diff = next as i64 - previous as i64;
    if diff.abs() != 1 {
        return 1.0;
    }

    if diff > 0 && previous == index {
        min_scale
    } else if diff < 0 && next == index {
        min_scale
    } else {
        1.0
    }
}

/// Transient animation state of one separator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSnapshot {
    /// The index seen by the last update.
    pub previous_index: usize,
    /// Target scale, in `[min_scale, 1]`.
    pub scale: f32,
    /// When the pending decay check is due, if one is armed.
    pub decay_deadline: Option<Instant>,
}

impl Default for TransitionSnapshot {
    fn default() -> Self {
        Self {
            previous_index: 0,
            scale: 1.0,
            decay_deadline: None,
        }
    }
}

/// Whether a separator is at rest or squeezed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorPhase {
    /// Full width.
    Settled,
    /// Squeezed, waiting for the decay check.
    Squeezed,
}

struct SeparatorInner {
    snapshot: TransitionSnapshot,
    /// Bumped by every update; a decay check only applies to its own update.
    generation: u64,
    /// Rendered scale, easing towards `snapshot.scale`.
    tween: Tween,
}

/// Animates the horizontal scale of the separator at a fixed index.
pub struct SeparatorAnimator {
    index: usize,
    min_scale: f32,
    duration: Duration,
    inner: Arc<Mutex<SeparatorInner>>,
    scheduler: Arc<TaskScheduler>,
}

impl SeparatorAnimator {
    /// Create an animator for the separator at `index`.
    ///
    /// Decay checks are posted to `scheduler`.
    pub fn new(index: usize, config: &StepsConfig, scheduler: Arc<TaskScheduler>) -> Self {
        let duration = config.animation_duration();
        Self {
            index,
            min_scale: config.min_scale,
            duration,
            inner: Arc::new(Mutex::new(SeparatorInner {
                snapshot: TransitionSnapshot::default(),
                generation: 0,
                tween: Tween::new(1.0, duration, config.easing),
            })),
            scheduler,
        }
    }

    /// Subscribe to `state`, stamping each change with `clock`.
    ///
    /// The returned guard disconnects the animator when dropped.
    pub fn connect(self: &Arc<Self>, state: &ProgressionState, clock: Arc<dyn Clock>) -> ConnectionGuard {
        let animator: Weak<Self> = Arc::downgrade(self);
        state.index_changed.connect_scoped(move |&next| {
            if let Some(animator) = animator.upgrade() {
                animator.on_index_changed(next, clock.now());
            }
        })
    }

    /// The separator position this animator is bound to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The configured squeeze scale.
    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    /// A copy of the transient animation state.
    pub fn snapshot(&self) -> TransitionSnapshot {
        self.inner.lock().snapshot
    }

    /// The current target scale.
    pub fn target_scale(&self) -> f32 {
        self.inner.lock().snapshot.scale
    }

    /// Whether the separator is squeezed or at rest.
    pub fn phase(&self) -> SeparatorPhase {
        if self.target_scale() == 1.0 {
            SeparatorPhase::Settled
        } else {
            SeparatorPhase::Squeezed
        }
    }

    /// The interpolated scale to render at `now`.
    pub fn scale_at(&self, now: Instant) -> f32 {
        self.inner.lock().tween.value_at(now)
    }

    /// Check if the scale is still moving at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.inner.lock().tween.is_running(now)
    }

    /// React to the shared index moving to `next` at `now`.
    #[tracing::instrument(skip(self), fields(separator = self.index), target = "horizon_steps::separator", level = "trace")]
    pub fn on_index_changed(&self, next: usize, now: Instant) {
        let deadline = now + self.duration;

        let (captured, generation) = {
            let mut inner = self.inner.lock();
            let previous = inner.snapshot.previous_index;
            let scale = target_scale(self.index, previous, next, self.min_scale);

            inner.snapshot.scale = scale;
            inner.snapshot.decay_deadline = Some(deadline);
            inner.snapshot.previous_index = next;
            inner.generation += 1;
            inner.tween.animate_to(scale, now);

            if scale != 1.0 {
                tracing::debug!(
                    target: targets::SEPARATOR,
                    separator = self.index,
                    previous,
                    next,
                    scale,
                    "separator squeezed"
                );
            }
            (scale, inner.generation)
        };

        let inner = Arc::downgrade(&self.inner);
        let index = self.index;
        self.scheduler.schedule_at(deadline, move |now| {
            if let Some(inner) = inner.upgrade() {
                decay(&mut inner.lock(), index, generation, captured, now);
            }
        });
    }
}

/// Reset a squeezed separator once its decay check is processed at `now`.
///
/// The return segment starts at `now` rather than at the deadline, so a late
/// frame still sees the separator ease back instead of snapping.
fn decay(inner: &mut SeparatorInner, index: usize, generation: u64, captured: f32, now: Instant) {
    if inner.generation != generation {
        // A newer transition re-armed the decay.
        return;
    }
    let snapshot = &mut inner.snapshot;
    snapshot.decay_deadline = None;

    if snapshot.scale != 1.0 && snapshot.scale == captured {
        snapshot.scale = 1.0;
        inner.tween.animate_to(1.0, now);
        tracing::debug!(target: targets::SEPARATOR, separator = index, "separator decayed");
    }
}

impl std::fmt::Debug for SeparatorAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeparatorAnimator")
            .field("index", &self.index)
            .field("min_scale", &self.min_scale)
            .field("snapshot", &self.snapshot())
            .finish()
    }
}
