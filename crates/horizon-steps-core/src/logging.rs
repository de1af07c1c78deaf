//! Logging facilities for Horizon Steps.
//!
//! Horizon Steps uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the host installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_steps=debug,horizon_steps_core=trace")
//!     .init();
//! ```
//!
//! Index changes are logged at `debug`, per-frame and per-emit activity at
//! `trace`, and recovered misuse (clamped indices, config fallbacks) at `warn`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Runtime crate target.
    pub const CORE: &str = "horizon_steps_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_steps_core::signal";
    /// Deferred task scheduler target.
    pub const SCHEDULER: &str = "horizon_steps_core::scheduler";
    /// Progression state target.
    pub const STATE: &str = "horizon_steps::state";
    /// Separator animation target.
    pub const SEPARATOR: &str = "horizon_steps::separator";
    /// Marker animation target.
    pub const MARKER: &str = "horizon_steps::marker";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_steps::config";
    /// Frame production target.
    pub const VIEW: &str = "horizon_steps::view";
}

/// Span names used for profiling.
pub mod span_names {
    /// Per-frame render data production.
    pub const FRAME: &str = "horizon_steps::frame";
    /// Index change fan-out to animators.
    pub const INDEX_CHANGE: &str = "horizon_steps::index_change";
}

/// A guard for a performance span.
///
/// The span is entered on creation and exited when the guard is dropped.
///
/// ```
/// use horizon_steps_core::logging::{PerfSpan, span_names};
///
/// let _span = PerfSpan::new(span_names::FRAME);
/// // ... produce the frame ...
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_steps::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

impl std::fmt::Debug for PerfSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerfSpan").finish_non_exhaustive()
    }
}
