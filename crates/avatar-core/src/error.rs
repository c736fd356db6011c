//! Error types for scene configuration.

use thiserror::Error;

/// Errors reported when a [`SceneConfig`](crate::SceneConfig) cannot drive a scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A value that must be strictly positive was zero or negative
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// A value fell outside its allowed range
    #[error("{field} must be within {min}..{max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// A value was NaN or infinite
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
}

/// Result alias for configuration checks.
pub type Result<T> = std::result::Result<T, ConfigError>;
