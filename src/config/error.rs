//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("failed to parse {name}='{value}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A count-like setting (k, cap, batch size) was zero.
    #[error("{name} must be greater than zero")]
    ZeroCount { name: &'static str },

    /// A score threshold fell outside `[0.0, 1.0]`.
    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },

    /// Fusion weights were negative, non-finite, or both zero.
    #[error("invalid fusion weights (vector={vector}, lexical={lexical}): {reason}")]
    InvalidFusionWeights {
        vector: f32,
        lexical: f32,
        reason: String,
    },

    /// Confidence thresholds were not ordered `medium <= high`.
    #[error("confidence thresholds out of order: medium={medium} > high={high}")]
    ThresholdOrder { medium: f32, high: f32 },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
