//! Frame production for a whole step indicator.
//!
//! [`StepsView`] wires one [`ProgressionState`] to a [`SeparatorAnimator`]
//! per gap and one [`MarkerAnimator`], and turns them into a plain
//! [`StepsFrame`] that a renderer can draw without knowing about signals or
//! animations.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use horizon_steps::{Step, StepState, StepsConfig, StepsView};
//! use horizon_steps_core::ManualClock;
//!
//! let clock = Arc::new(ManualClock::default());
//! let view = StepsView::new(
//!     vec![Step::new("Cart"), Step::new("Shipping"), Step::new("Payment")],
//!     StepsConfig::default(),
//!     clock.clone(),
//! )
//! .unwrap();
//!
//! view.advance();
//! let frame = view.frame(clock.advance(Duration::from_millis(250)));
//! assert_eq!(frame.current_index, 1);
//! assert_eq!(frame.steps[0].state, StepState::Completed);
//! assert_eq!(frame.separators.len(), 2);
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use horizon_steps_core::logging::{PerfSpan, span_names, targets};
use horizon_steps_core::{Clock, ConnectionGuard, TaskScheduler};

use crate::config::StepsConfig;
use crate::error::Result;
use crate::geometry::AffineTransform;
use crate::marker::MarkerAnimator;
use crate::separator::SeparatorAnimator;
use crate::state::ProgressionState;
use crate::step::{Step, StepState};
use crate::theme::Color;

/// Render data of one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepFrame {
    /// Position in the sequence.
    pub index: usize,
    /// Title shown under the marker.
    pub title: String,
    /// Icon name, if the step has one.
    pub icon: Option<String>,
    /// State relative to the current index.
    pub state: StepState,
    /// Color resolved from the theme for `state`.
    pub color: Color,
}

/// Render data of the separator following the step at `index`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparatorFrame {
    /// Index of the step on the separator's left.
    pub index: usize,
    /// Interpolated horizontal scale, in `[min_scale, 1]`.
    pub scale: f32,
    /// Color of the step on the separator's left.
    pub color: Color,
    /// Line thickness in logical pixels.
    pub thickness: f32,
}

impl SeparatorFrame {
    /// The scale as a transform about the separator's horizontal center.
    pub fn transform(&self, center_x: f32) -> AffineTransform {
        AffineTransform::scale_x_around(self.scale, center_x)
    }
}

/// Everything needed to draw the indicator at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct StepsFrame {
    /// The current index when the frame was produced.
    pub current_index: usize,
    /// One entry per step, in order.
    pub steps: Vec<StepFrame>,
    /// One entry per gap between steps, in order.
    pub separators: Vec<SeparatorFrame>,
    /// Transform of the current-step marker.
    pub marker: AffineTransform,
}

/// A step indicator: state, animators and the scheduler driving them.
pub struct StepsView {
    state: Arc<ProgressionState>,
    config: StepsConfig,
    scheduler: Arc<TaskScheduler>,
    clock: Arc<dyn Clock>,
    separators: Vec<Arc<SeparatorAnimator>>,
    marker: Arc<MarkerAnimator>,
    _connections: Vec<ConnectionGuard>,
}

impl StepsView {
    /// Create a view over `steps`, starting at the first step.
    ///
    /// Fails if `config` does not validate.
    pub fn new(steps: Vec<Step>, config: StepsConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;

        let state = Arc::new(ProgressionState::with_policy(steps, config.index_policy));
        let scheduler = Arc::new(TaskScheduler::new());

        let gaps = state.len().saturating_sub(1);
        let separators: Vec<_> = (0..gaps)
            .map(|index| Arc::new(SeparatorAnimator::new(index, &config, scheduler.clone())))
            .collect();
        let marker = Arc::new(MarkerAnimator::new(state.current_index(), &config));

        let mut connections: Vec<_> = separators
            .iter()
            .map(|separator| separator.connect(&state, clock.clone()))
            .collect();
        connections.push(marker.connect(&state, clock.clone()));

        tracing::debug!(target: targets::VIEW, steps = state.len(), separators = gaps, "steps view created");

        Ok(Self {
            state,
            config,
            scheduler,
            clock,
            separators,
            marker,
            _connections: connections,
        })
    }

    /// The shared progression state.
    pub fn state(&self) -> &Arc<ProgressionState> {
        &self.state
    }

    /// The configuration the view was built with.
    pub fn config(&self) -> &StepsConfig {
        &self.config
    }

    /// The scheduler carrying pending decay checks.
    pub fn scheduler(&self) -> &Arc<TaskScheduler> {
        &self.scheduler
    }

    /// The separator animators, one per gap between steps.
    pub fn separators(&self) -> &[Arc<SeparatorAnimator>] {
        &self.separators
    }

    /// The marker animator.
    pub fn marker(&self) -> &Arc<MarkerAnimator> {
        &self.marker
    }

    /// Move to the next step. See [`ProgressionState::advance`].
    pub fn advance(&self) -> bool {
        let _span = PerfSpan::new(span_names::INDEX_CHANGE);
        self.state.advance()
    }

    /// Move to the previous step. See [`ProgressionState::retreat`].
    pub fn retreat(&self) -> bool {
        let _span = PerfSpan::new(span_names::INDEX_CHANGE);
        self.state.retreat()
    }

    /// Move to `index`. See [`ProgressionState::set_current_index`].
    pub fn set_current_index(&self, index: usize) -> Result<bool> {
        let _span = PerfSpan::new(span_names::INDEX_CHANGE);
        Ok(self.state.set_current_index(index)?)
    }

    /// Check if any separator or the marker is still moving at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.marker.is_animating(now)
            || self.separators.iter().any(|separator| separator.is_animating(now))
            || self.scheduler.active_count() > 0
    }

    /// How long the host may wait after `now` before the next frame.
    ///
    /// `Some(Duration::ZERO)` while anything is easing, the delay until the
    /// next decay check while only checks are pending, and `None` when the
    /// indicator is idle.
    pub fn time_until_next_frame(&self, now: Instant) -> Option<Duration> {
        let easing = self.marker.is_animating(now)
            || self.separators.iter().any(|separator| separator.is_animating(now));
        if easing {
            return Some(Duration::ZERO);
        }
        self.scheduler.time_until_next(now)
    }

    /// Produce the frame for the clock's current time.
    pub fn frame_now(&self) -> StepsFrame {
        self.frame(self.clock.now())
    }

    /// Run due decay checks and produce the frame for `now`.
    ///
    /// Frames should be requested with non-decreasing timestamps; the marker
    /// infers its direction from the previous frame.
    pub fn frame(&self, now: Instant) -> StepsFrame {
        let _span = PerfSpan::new(span_names::FRAME);
        let ran = self.scheduler.process_ready(now);

        let theme = &self.config.theme;
        let current_index = self.state.current_index();

        let steps = self
            .state
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let state = self.state.step_state(index);
                StepFrame {
                    index,
                    title: step.title.clone(),
                    icon: step.icon.clone(),
                    state,
                    color: theme.color_for(state),
                }
            })
            .collect();

        let separators = self
            .separators
            .iter()
            .map(|separator| {
                let index = separator.index();
                SeparatorFrame {
                    index,
                    scale: separator.scale_at(now),
                    color: theme.color_for(self.state.step_state(index)),
                    thickness: self.config.line_thickness,
                }
            })
            .collect();

        let marker = self.marker.transform_at(now);

        tracing::trace!(target: targets::VIEW, current_index, tasks_run = ran, "frame produced");

        StepsFrame {
            current_index,
            steps,
            separators,
            marker,
        }
    }
}

impl std::fmt::Debug for StepsView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepsView")
            .field("state", &self.state)
            .field("separators", &self.separators.len())
            .field("pending_tasks", &self.scheduler.active_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use horizon_steps_core::ManualClock;

    use super::*;
    use crate::animation::Easing;
    use crate::error::{Error, ProgressionError};
    use crate::state::IndexPolicy;
    use crate::theme::Theme;

    const DURATION: Duration = Duration::from_millis(200);

    fn config() -> StepsConfig {
        StepsConfig {
            animation_duration_ms: 200,
            easing: Easing::Linear,
            ..StepsConfig::default()
        }
    }

    fn view(titles: &[&str], config: StepsConfig) -> (StepsView, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let steps = titles.iter().copied().map(Step::new).collect();
        (StepsView::new(steps, config, clock.clone()).unwrap(), clock)
    }

    #[test]
    fn test_initial_frame() {
        let (view, _clock) = view(&["a", "b", "c"], config());
        let frame = view.frame_now();

        assert_eq!(frame.current_index, 0);
        let states: Vec<_> = frame.steps.iter().map(|s| s.state).collect();
        assert_eq!(states, [StepState::Current, StepState::Uncompleted, StepState::Uncompleted]);
        assert!(frame.separators.iter().all(|s| s.scale == 1.0 && s.thickness == 2.0));
        assert!(frame.marker.is_identity());
    }

    #[test]
    fn test_colors_follow_step_state() {
        let (view, _clock) = view(&["a", "b", "c"], config());
        view.set_current_index(1).unwrap();
        let frame = view.frame_now();
        let theme = Theme::light();

        assert_eq!(frame.steps[0].color, theme.primary);
        assert_eq!(frame.steps[1].color, theme.disabled);
        assert_eq!(frame.separators[0].color, theme.primary);
        assert_eq!(frame.separators[1].color, theme.disabled);
    }

    #[test]
    fn test_advance_squeezes_left_separator_then_decays() {
        let (view, clock) = view(&["a", "b", "c"], config());
        let start = clock.now();

        view.advance();
        let frame = view.frame(start + DURATION / 2);
        assert_eq!(frame.separators[0].scale, 0.625);
        assert_eq!(frame.separators[1].scale, 1.0);
        assert_eq!(frame.marker.shear_x_component(), -0.1);

        // The decay segment starts at the deadline and finishes one duration later.
        let frame = view.frame(start + DURATION);
        assert_eq!(frame.separators[0].scale, 0.25);
        assert_eq!(view.separators()[0].target_scale(), 1.0);
        assert_eq!(frame.marker.translate_x(), 80.0);

        let frame = view.frame(start + DURATION * 2);
        assert_eq!(frame.separators[0].scale, 1.0);
        assert!(!view.is_animating(start + DURATION * 2));
    }

    #[test]
    fn test_time_until_next_frame() {
        let (view, clock) = view(&["a", "b", "c"], config());
        let start = clock.now();
        assert_eq!(view.time_until_next_frame(start), None);

        view.advance();
        assert_eq!(view.time_until_next_frame(start), Some(Duration::ZERO));

        // Easing has finished but the decay checks are due.
        assert_eq!(view.time_until_next_frame(start + DURATION), Some(Duration::ZERO));

        view.frame(start + DURATION);
        view.frame(start + DURATION * 2);
        assert_eq!(view.time_until_next_frame(start + DURATION * 2), None);
    }

    #[test]
    fn test_single_step_has_no_separators() {
        let (view, _clock) = view(&["only"], config());
        assert!(view.separators().is_empty());
        assert!(!view.advance());
        assert!(view.frame_now().separators.is_empty());
    }

    #[test]
    fn test_reject_policy_surfaces_error() {
        let config = StepsConfig {
            index_policy: IndexPolicy::Reject,
            ..config()
        };
        let (view, _clock) = view(&["a", "b"], config);
        let err = view.set_current_index(5).unwrap_err();
        assert!(matches!(
            err,
            Error::Progression(ProgressionError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_invalid_config_is_refused() {
        let config = StepsConfig {
            min_scale: 0.0,
            ..config()
        };
        let result = StepsView::new(vec![Step::new("a")], config, Arc::new(ManualClock::default()));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_separator_transform_scales_about_center() {
        let frame = SeparatorFrame {
            index: 0,
            scale: 0.25,
            color: Color::WHITE,
            thickness: 2.0,
        };
        let t = frame.transform(40.0);
        assert_eq!(t.transform_point(40.0, 0.0), (40.0, 0.0));
        assert_eq!(t.transform_point(80.0, 0.0), (50.0, 0.0));
    }
}
