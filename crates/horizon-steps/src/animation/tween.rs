//! Time-based interpolation of a single animatable value.

use std::time::{Duration, Instant};

use super::easing::{Easing, lerp_eased};

/// An animatable `f32` that eases from its current value to a target.
///
/// Retargeting mid-flight starts the new segment from the value the tween
/// had at that instant, so motion never jumps.
#[derive(Debug, Clone)]
pub struct Tween {
    /// Value at the start of the current segment.
    from: f32,
    /// Value the current segment ends on.
    to: f32,
    /// When the current segment started, `None` when at rest.
    start_time: Option<Instant>,
    /// Duration of each segment.
    duration: Duration,
    /// Easing applied to each segment.
    easing: Easing,
}

impl Tween {
    /// Create a tween resting at `value`.
    pub fn new(value: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from: value,
            to: value,
            start_time: None,
            duration,
            easing,
        }
    }

    /// The value the tween is heading to (or resting at).
    #[inline]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Get the segment duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Get the easing function.
    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Linear progress of the current segment at `now`, in `0.0..=1.0`.
    ///
    /// A resting tween reports `1.0`.
    pub fn progress_at(&self, now: Instant) -> f32 {
        let Some(start_time) = self.start_time else {
            return 1.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }

        let elapsed = now.saturating_duration_since(start_time);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }

    /// Sample the value at `now`.
    pub fn value_at(&self, now: Instant) -> f32 {
        let progress = self.progress_at(now);
        if progress >= 1.0 {
            self.to
        } else {
            lerp_eased(self.easing, self.from, self.to, progress)
        }
    }

    /// Check if a segment is still running at `now`.
    pub fn is_running(&self, now: Instant) -> bool {
        self.start_time.is_some() && self.progress_at(now) < 1.0
    }

    /// Start a new segment towards `target` at `now`.
    ///
    /// Retargeting to the current target is a no-op, so an in-flight segment
    /// keeps its timing.
    pub fn animate_to(&mut self, target: f32, now: Instant) {
        if target == self.to {
            return;
        }
        self.from = self.value_at(now);
        self.to = target;
        self.start_time = Some(now);
    }

    /// Move to `value` immediately, cancelling any running segment.
    pub fn jump_to(&mut self, value: f32) {
        self.from = value;
        self.to = value;
        self.start_time = None;
    }
}
