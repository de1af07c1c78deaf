//! Easing and interpolation for step transitions.
//!
//! The model never snaps a rendered value: separator scales and marker
//! offsets move through a [`Tween`] that is sampled once per frame.
//!
//! # Example
//!
//! ```
//! use horizon_steps::animation::{Easing, Tween};
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut scale = Tween::new(1.0, Duration::from_millis(200), Easing::Linear);
//! scale.animate_to(0.25, start);
//!
//! assert_eq!(scale.value_at(start), 1.0);
//! assert_eq!(scale.value_at(start + Duration::from_millis(100)), 0.625);
//! assert_eq!(scale.value_at(start + Duration::from_millis(200)), 0.25);
//! ```

mod easing;
mod tween;

pub use easing::{Easing, ease, lerp_eased};
pub use tween::Tween;
