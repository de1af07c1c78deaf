//! The sliding current-step marker.
//!
//! [`MarkerAnimator`] eases the marker offset to `index * step_spacing` and
//! runs a slide progress from 0 to 1 over the same duration. Every frame the
//! host samples it with [`MarkerAnimator::transform_at`], which feeds the
//! interpolated pair into an [`OffsetEffect`] so the marker leans against
//! its direction of travel while moving.

use std::sync::{Arc, Weak};
use std::time::Instant;

use horizon_steps_core::logging::targets;
use horizon_steps_core::{Clock, ConnectionGuard};
use parking_lot::Mutex;

use crate::animation::{Easing, Tween};
use crate::config::StepsConfig;
use crate::geometry::{AffineTransform, OffsetEffect};
use crate::state::ProgressionState;

struct MarkerInner {
    offset: Tween,
    progress: Tween,
    effect: OffsetEffect,
}

/// Animates the marker that slides to the current step.
pub struct MarkerAnimator {
    step_spacing: f32,
    inner: Mutex<MarkerInner>,
}

impl MarkerAnimator {
    /// Create a marker resting on the step at `index`.
    pub fn new(index: usize, config: &StepsConfig) -> Self {
        let duration = config.animation_duration();
        let offset = index as f32 * config.step_spacing;
        Self {
            step_spacing: config.step_spacing,
            inner: Mutex::new(MarkerInner {
                offset: Tween::new(offset, duration, config.easing),
                // Progress is time, the easing lives in the offset.
                progress: Tween::new(1.0, duration, Easing::Linear),
                effect: OffsetEffect::new(offset, 1.0, config.skew_factor),
            }),
        }
    }

    /// Subscribe to `state`, stamping each change with `clock`.
    ///
    /// The returned guard disconnects the marker when dropped.
    pub fn connect(self: &Arc<Self>, state: &ProgressionState, clock: Arc<dyn Clock>) -> ConnectionGuard {
        let marker: Weak<Self> = Arc::downgrade(self);
        state.index_changed.connect_scoped(move |&index| {
            if let Some(marker) = marker.upgrade() {
                marker.on_index_changed(index, clock.now());
            }
        })
    }

    /// The resting offset of the step at `index`.
    pub fn offset_for(&self, index: usize) -> f32 {
        index as f32 * self.step_spacing
    }

    /// Start sliding to the step at `index`.
    pub fn on_index_changed(&self, index: usize, now: Instant) {
        let target = self.offset_for(index);
        let mut inner = self.inner.lock();
        inner.offset.animate_to(target, now);
        inner.progress.jump_to(0.0);
        inner.progress.animate_to(1.0, now);
        tracing::debug!(target: targets::MARKER, index, offset = target, "marker sliding");
    }

    /// The interpolated offset at `now`, without touching the effect.
    pub fn offset_at(&self, now: Instant) -> f32 {
        self.inner.lock().offset.value_at(now)
    }

    /// Check if the marker is still sliding at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        let inner = self.inner.lock();
        inner.offset.is_running(now) || inner.progress.is_running(now)
    }

    /// Sample the marker at `now` and return its transform.
    ///
    /// Each call is one sample of the effect: the direction is inferred from
    /// the offset of the previous call.
    pub fn transform_at(&self, now: Instant) -> AffineTransform {
        let mut inner = self.inner.lock();
        let offset = inner.offset.value_at(now);
        let progress = inner.progress.value_at(now);
        inner.effect.set_sample(offset, progress);

        let transform = inner.effect.transform();
        tracing::trace!(
            target: targets::MARKER,
            offset,
            progress,
            shear = transform.shear_x_component(),
            "marker sampled"
        );
        transform
    }

    /// A copy of the effect as of the last sample.
    pub fn effect(&self) -> OffsetEffect {
        self.inner.lock().effect.clone()
    }
}

impl std::fmt::Debug for MarkerAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerAnimator")
            .field("step_spacing", &self.step_spacing)
            .field("effect", &self.effect())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use horizon_steps_core::ManualClock;

    use super::*;
    use crate::geometry::Direction;

    const DURATION: Duration = Duration::from_millis(200);

    fn config() -> StepsConfig {
        StepsConfig {
            animation_duration_ms: 200,
            easing: Easing::Linear,
            step_spacing: 80.0,
            ..StepsConfig::default()
        }
    }

    #[test]
    fn test_rests_without_skew() {
        let marker = MarkerAnimator::new(2, &config());
        let t = marker.transform_at(Instant::now());
        assert_eq!(t.translate_x(), 160.0);
        assert_eq!(t.shear_x_component(), 0.0);
        assert_eq!(marker.effect().direction(), Direction::NotIncreasing);
    }

    #[test]
    fn test_advancing_leans_back() {
        let marker = MarkerAnimator::new(0, &config());
        let start = Instant::now();

        marker.on_index_changed(1, start);
        assert_eq!(marker.transform_at(start).shear_x_component(), 0.0);

        let t = marker.transform_at(start + DURATION / 2);
        assert_eq!(t.translate_x(), 40.0);
        assert_eq!(t.shear_x_component(), -0.1);
        assert_eq!(marker.effect().direction(), Direction::Increasing);
        assert!(marker.is_animating(start + DURATION / 2));

        let t = marker.transform_at(start + DURATION);
        assert_eq!(t.translate_x(), 80.0);
        assert_eq!(t.shear_x_component(), 0.0);
        assert!(!marker.is_animating(start + DURATION));
    }

    #[test]
    fn test_retreating_leans_forward() {
        let marker = MarkerAnimator::new(1, &config());
        let start = Instant::now();
        marker.transform_at(start);

        marker.on_index_changed(0, start);
        let t = marker.transform_at(start + DURATION / 2);
        assert_eq!(t.translate_x(), 40.0);
        assert_eq!(t.shear_x_component(), 0.1);
    }

    #[test]
    fn test_repeated_sample_reports_not_increasing() {
        let marker = MarkerAnimator::new(0, &config());
        let start = Instant::now();
        marker.on_index_changed(1, start);

        marker.transform_at(start + DURATION / 2);
        let t = marker.transform_at(start + DURATION / 2);
        assert_eq!(marker.effect().direction(), Direction::NotIncreasing);
        assert_eq!(t.shear_x_component(), 0.1);
    }

    #[test]
    fn test_connect_follows_state() {
        let start = Instant::now();
        let clock = Arc::new(ManualClock::new(start));
        let state = ProgressionState::from_titles(["a", "b", "c"]);
        let marker = Arc::new(MarkerAnimator::new(0, &config()));
        let _guard = marker.connect(&state, clock.clone());

        state.set_current_index(2).unwrap();
        clock.advance(DURATION);
        assert_eq!(marker.offset_at(clock.now()), 160.0);
    }
}
