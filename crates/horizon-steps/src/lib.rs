//! Horizon Steps - an animated step-progression indicator model.
//!
//! A step indicator shows a linear sequence of steps (a checkout flow, an
//! onboarding wizard) with every step marked as completed, current or
//! uncompleted. This crate holds everything except the drawing:
//!
//! - [`ProgressionState`]: the steps and the current index, with change
//!   notifications
//! - [`resolve`]: the pure mapping from index to [`StepState`]
//! - [`SeparatorAnimator`]: the squeeze-and-decay animation of the line
//!   between two steps
//! - [`MarkerAnimator`] and [`OffsetEffect`]: the sliding marker that leans
//!   against its direction of travel
//! - [`StepsView`]: all of the above wired together, producing one
//!   [`StepsFrame`] per rendered frame
//!
//! The host drives time: every time-dependent call takes the frame
//! `Instant`, and deferred work waits in a
//! [`TaskScheduler`](runtime::TaskScheduler) until the host processes it.
//!
//! # Example
//!
//! ```
//! use horizon_steps::{resolve, ProgressionState, StepState};
//!
//! assert_eq!(resolve(0, 1, 3), StepState::Completed);
//! assert_eq!(resolve(1, 1, 3), StepState::Current);
//! assert_eq!(resolve(2, 1, 3), StepState::Uncompleted);
//!
//! let state = ProgressionState::from_titles(["Account", "Profile", "Done"]);
//! assert!(state.advance());
//! assert_eq!(state.step_state(1), StepState::Current);
//! ```

pub mod animation;
pub mod config;
mod error;
pub mod geometry;
pub mod marker;
pub mod separator;
pub mod state;
pub mod step;
pub mod theme;
pub mod view;

pub use config::StepsConfig;
pub use error::{ConfigError, Error, ProgressionError, Result};
pub use geometry::{AffineTransform, Direction, OffsetEffect, compute_transform};
pub use marker::MarkerAnimator;
pub use separator::{SeparatorAnimator, SeparatorPhase, TransitionSnapshot};
pub use state::{IndexPolicy, ProgressionState};
pub use step::{ColorRole, Step, StepState, resolve};
pub use theme::{Color, Theme};
pub use view::{SeparatorFrame, StepFrame, StepsFrame, StepsView};

/// The reactive runtime the model is built on.
pub mod runtime {
    pub use horizon_steps_core::*;
}
