//! Configuration errors
//!
//! The simulation core never fails; only loading page settings can.

use thiserror::Error;

/// Errors raised when parsing or validating [`crate::Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least {min} heads are required, got {actual}")]
    TooFewHeads { min: usize, actual: usize },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
