//! Sentence encoder used by the vector retrieval backends.
//!
//! Use [`EncoderConfig::stub`] for tests and corpora without model files; the stub is a
//! hashed bag-of-words projection, so texts sharing words land close together.

pub mod config;

#[cfg(test)]
mod tests;

pub use config::{ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EncoderConfig};

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::constants::is_stop_word;
use crate::embedding::bert::BertSentenceModel;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::{load_tokenizer, missing_model_files};
use crate::retrieval::tokenize;

/// Turns text into a unit-length embedding.
///
/// Implementations are synchronous and may be CPU-heavy; async callers should run them on
/// a blocking thread.
pub trait QueryEncoder: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.encode(text)).collect()
    }

    fn dimension(&self) -> usize;
}

enum EncoderBackend {
    Model {
        model: BertSentenceModel,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

pub struct BertEncoder {
    backend: EncoderBackend,
    config: EncoderConfig,
}

impl std::fmt::Debug for BertEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .finish()
    }
}

impl BertEncoder {
    pub fn load(config: EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let Some(model_path) = config.model_path.clone() else {
            warn!("No encoder model configured, using hashed bag-of-words stub");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
            });
        };

        if !model_path.exists() {
            return Err(EmbeddingError::ModelNotFound { path: model_path });
        }
        let missing = missing_model_files(&model_path);
        if !missing.is_empty() {
            return Err(EmbeddingError::ModelLoadFailed {
                reason: format!("Missing {} in {}", missing.join(", "), model_path.display()),
            });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for encoder");

        let model = BertSentenceModel::load(&model_path, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT encoder: {}", e),
            }
        })?;
        let tokenizer = load_tokenizer(&model_path, config.max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        let config = EncoderConfig {
            embedding_dim: model.hidden_size(),
            ..config
        };

        info!(
            model_path = %model_path.display(),
            embedding_dim = config.embedding_dim,
            "Encoder model loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model,
                tokenizer,
                device,
            },
            config,
        })
    }

    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(EncoderConfig::stub())
    }

    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    fn encode_with_model(
        &self,
        text: &str,
        model: &BertSentenceModel,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        if encoding.get_ids().is_empty() {
            return Ok(vec![0.0; self.config.embedding_dim]);
        }

        let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;

        let embedding = model.embed(&input_ids, &type_ids)?;
        Ok(l2_normalize(embedding))
    }

    fn encode_stub(&self, text: &str) -> Vec<f32> {
        let dim = self.config.embedding_dim;
        let mut embedding = vec![0.0f32; dim];

        for token in tokenize(text) {
            if is_stop_word(&token) {
                continue;
            }
            let hash = blake3::hash(token.as_bytes());
            let bytes = hash.as_bytes();
            let bucket = u64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]) as usize
                % dim;
            let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
        }

        l2_normalize(embedding)
    }
}

impl QueryEncoder for BertEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.encode_with_model(text, model, tokenizer, device),
            EncoderBackend::Stub => Ok(self.encode_stub(text)),
        }
    }

    fn dimension(&self) -> usize {
        self.config.embedding_dim
    }
}

fn l2_normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }
    embedding
}
