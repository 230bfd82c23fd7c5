//! Configuration errors.
//!
//! The simulation itself has no failure modes at runtime; everything that can be
//! wrong is caught once, when an `Orrery` is built from its configuration.

use thiserror::Error;

/// Result type for configuration loading and validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration has no bodies")]
    NoBodies,

    #[error("duplicate body name: {0}")]
    DuplicateName(String),

    #[error("body {name} has non-positive size {size}")]
    NonPositiveSize { name: String, size: f32 },

    #[error("body {name} has a negative orbital radius")]
    NegativeRadius { name: String },

    #[error("more than one central body: {0} and {1}")]
    MultipleCentral(String, String),

    #[error("invalid comet speed range [{min}, {max}]")]
    InvalidSpeedRange { min: f32, max: f32 },

    #[error("{what} interval must be positive, got {value}")]
    NonPositiveInterval { what: &'static str, value: f32 },

    #[error("{what} is out of range: {value}")]
    InvalidDuration { what: &'static str, value: f32 },

    #[error("camera smoothing factor must be in (0, 1], got {0}")]
    InvalidSmoothing(f32),

    #[error("{what} bounds are invalid: min {min}, max {max}")]
    InvalidBounds { what: &'static str, min: f32, max: f32 },
}
