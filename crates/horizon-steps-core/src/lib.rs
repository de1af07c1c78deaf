//! Core runtime for Horizon Steps.
//!
//! This crate provides the small reactive runtime the step-progression model
//! is built on:
//!
//! - **Signal/Slot System**: ordered publish/subscribe notifications
//! - **Property System**: change-detecting value cells
//! - **Scheduler**: one-shot deferred tasks driven by frame timestamps
//! - **Clocks**: system and manually stepped frame clocks
//! - **Logging**: `tracing` targets and performance spans
//!
//! Everything is designed for a single UI thread driven by frames: the host
//! supplies the current `Instant`, and nothing here reads the clock.
//!
//! # Example
//!
//! ```
//! use horizon_steps_core::{Property, Signal, TaskScheduler};
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//!
//! let index = Property::new(0usize);
//! let index_changed = Arc::new(Signal::<usize>::new());
//! let scheduler = Arc::new(TaskScheduler::new());
//! let start = Instant::now();
//!
//! let deferred = scheduler.clone();
//! index_changed.connect(move |&next| {
//!     deferred.schedule_once(start, Duration::from_millis(250), move |_now| {
//!         println!("settled on {next}");
//!     });
//! });
//!
//! if index.set(1) {
//!     index_changed.emit(1);
//! }
//! assert_eq!(scheduler.process_ready(start + Duration::from_millis(250)), 1);
//! ```

pub mod clock;
pub mod logging;
pub mod property;
mod scheduler;
pub mod signal;

pub use clock::{Clock, ManualClock, SystemClock};
pub use logging::PerfSpan;
pub use property::{Property, ReadOnlyProperty};
pub use scheduler::TaskScheduler;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
