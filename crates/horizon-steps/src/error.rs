//! Error types for the step indicator.

use std::path::PathBuf;

/// Result type alias for step indicator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the step indicator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A progression operation was rejected.
    #[error(transparent)]
    Progression(#[from] ProgressionError),
}

/// Errors raised while loading or validating [`StepsConfig`](crate::StepsConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or schema error.
    #[error("Invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A color string is not `#RRGGBB` or `#RRGGBBAA`.
    #[error("Invalid color '{0}': expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    /// A numeric field is out of its allowed range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

/// Errors raised by [`ProgressionState`](crate::ProgressionState) under
/// [`IndexPolicy::Reject`](crate::IndexPolicy::Reject).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    /// The requested index is outside `0..len`.
    #[error("Step index {index} is out of range for {len} steps")]
    IndexOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ProgressionError::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(err.to_string(), "Step index 5 is out of range for 3 steps");

        let err: Error = ConfigError::invalid_value("min_scale", "must be in (0, 1]").into();
        assert_eq!(err.to_string(), "Invalid value for 'min_scale': must be in (0, 1]");
    }
}
