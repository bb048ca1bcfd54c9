use std::path::PathBuf;
use thiserror::Error;

use crate::embedding::error::EmbeddingError;

#[derive(Debug, Error)]
pub enum RerankerError {
    #[error("invalid cross-encoder configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("cross-encoder model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    /// The model directory exists but lacks files `Reranker::load` needs.
    #[error("cross-encoder model at {path} is missing {}", missing.join(", "))]
    IncompleteModel {
        path: PathBuf,
        missing: Vec<&'static str>,
    },

    #[error("failed to load cross-encoder model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("cross-encoder tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("cross-encoder inference failed: {reason}")]
    InferenceFailed { reason: String },

    /// Compute device selection is shared with the sentence encoder.
    #[error("cross-encoder device selection failed: {0}")]
    Device(#[from] EmbeddingError),
}

impl From<candle_core::Error> for RerankerError {
    fn from(err: candle_core::Error) -> Self {
        RerankerError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}
