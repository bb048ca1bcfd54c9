use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Default output dimension (MiniLM-L6 hidden size).
pub const ENCODER_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// Default maximum tokens per encoded text.
pub const ENCODER_MAX_SEQ_LEN: usize = 256;

#[derive(Debug, Clone)]
/// Configuration for [`BertEncoder`](super::BertEncoder).
pub struct EncoderConfig {
    /// Model directory (`config.json`, `model.safetensors`, `tokenizer.json`). `None` = stub.
    pub model_path: Option<PathBuf>,
    /// Output dimension in stub mode; checked against the model's hidden size otherwise.
    pub embedding_dim: usize,
    /// Max tokens to consider.
    pub max_seq_len: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            embedding_dim: ENCODER_EMBEDDING_DIM,
            max_seq_len: ENCODER_MAX_SEQ_LEN,
        }
    }
}

impl EncoderConfig {
    /// Env var used to locate the model directory.
    pub const ENV_MODEL_PATH: &'static str = "VERDICT_ENCODER_PATH";

    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    /// Deterministic hashed bag-of-words encoder (no model files required).
    pub fn stub() -> Self {
        Self::default()
    }

    pub fn with_embedding_dim(mut self, dim: usize) -> Self {
        self.embedding_dim = dim;
        self
    }

    pub fn from_env() -> Self {
        let model_path = std::env::var(Self::ENV_MODEL_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            model_path,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be greater than zero".to_string(),
            });
        }
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }
        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_path cannot be empty when provided".to_string(),
            });
        }
        Ok(())
    }
}
