//! Step indicator configuration.
//!
//! Every field has a default, so a config file only lists what it changes:
//!
//! ```toml
//! min_scale = 0.3
//! animation_duration_ms = 300
//! easing = "ease-out-cubic"
//! index_policy = "reject"
//!
//! [theme]
//! primary = "#34C759"
//! disabled = "#C7C7CC"
//! ```

use std::path::Path;
use std::time::Duration;

use horizon_steps_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::error::ConfigError;
use crate::geometry::DEFAULT_SKEW_FACTOR;
use crate::state::IndexPolicy;
use crate::theme::Theme;

/// Default horizontal scale of a squeezed separator.
pub const DEFAULT_MIN_SCALE: f32 = 0.25;

/// Default duration of every transition, in milliseconds.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 250;

/// Read-only settings shared by every component of one indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StepsConfig {
    /// Horizontal scale of a squeezed separator, in `(0, 1]`.
    pub min_scale: f32,
    /// Duration of scale/slide animations and of the squeeze decay delay.
    pub animation_duration_ms: u64,
    /// Maximum shear of the sliding marker.
    pub skew_factor: f32,
    /// Easing of every interpolated value.
    pub easing: Easing,
    /// Separator line thickness in logical pixels.
    pub line_thickness: f32,
    /// Horizontal distance between two step markers in logical pixels.
    pub step_spacing: f32,
    /// What `set_current_index` does with an out-of-range index.
    pub index_policy: IndexPolicy,
    /// Colors keyed by step state.
    pub theme: Theme,
}

impl Default for StepsConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            skew_factor: DEFAULT_SKEW_FACTOR,
            easing: Easing::default(),
            line_thickness: 2.0,
            step_spacing: 80.0,
            index_policy: IndexPolicy::default(),
            theme: Theme::default(),
        }
    }
}

impl StepsConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| ConfigError::io(path, err))?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded steps config");
        Ok(config)
    }

    /// Like [`load`](Self::load), but falls back to the defaults on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    target: targets::CONFIG,
                    path = %path.display(),
                    error = %err,
                    "using default steps config"
                );
                Self::default()
            }
        }
    }

    /// Check every numeric field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_scale > 0.0 && self.min_scale <= 1.0) {
            return Err(ConfigError::invalid_value(
                "min_scale",
                format!("{} is not in (0, 1]", self.min_scale),
            ));
        }
        if !(self.skew_factor >= 0.0 && self.skew_factor.is_finite()) {
            return Err(ConfigError::invalid_value(
                "skew_factor",
                format!("{} is not a finite, non-negative number", self.skew_factor),
            ));
        }
        if !(self.line_thickness > 0.0 && self.line_thickness.is_finite()) {
            return Err(ConfigError::invalid_value(
                "line_thickness",
                format!("{} is not a positive number", self.line_thickness),
            ));
        }
        if !(self.step_spacing > 0.0 && self.step_spacing.is_finite()) {
            return Err(ConfigError::invalid_value(
                "step_spacing",
                format!("{} is not a positive number", self.step_spacing),
            ));
        }
        Ok(())
    }

    /// The animation duration.
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }
}
