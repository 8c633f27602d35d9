//! Construction-time configuration errors.

/// A configuration value the simulation refuses to run with.
/// Every variant names the offending field.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid screen size {width}x{height}: both dimensions must be positive and finite")]
    InvalidScreenSize { width: f32, height: f32 },

    #[error(
        "orbit_radius {radius} does not fit: orbit plus player ({player_extent}px) needs {required}px, screen allows {available}px"
    )]
    OrbitDoesNotFit {
        radius: f32,
        player_extent: f32,
        required: f32,
        available: f32,
    },

    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },
}

impl ConfigError {
    /// Name of the configuration field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::InvalidScreenSize { .. } => "screen_size",
            ConfigError::OrbitDoesNotFit { .. } => "orbit_radius",
            ConfigError::NonPositive { field, .. }
            | ConfigError::OutOfRange { field, .. }
            | ConfigError::ZeroCount { field } => field,
        }
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
