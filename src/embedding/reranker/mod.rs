pub mod config;
pub mod error;


pub use config::{MAX_SEQ_LEN, RerankerConfig};
pub use error::RerankerError;

use crate::embedding::bert::BertClassifier;
use candle_core::Tensor;
use std::collections::HashSet;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::constants::is_stop_word;
use crate::embedding::device::select_device;
use crate::embedding::utils::{load_tokenizer, missing_model_files};

/// Cross-encoder scoring `(query, passage)` pairs.
///
/// Without a model path it runs in stub mode and scores by query-term overlap.
pub struct Reranker {
    device: candle_core::Device,
    config: RerankerConfig,
    model: Option<BertClassifier>,
    tokenizer: Option<Tokenizer>,
}

impl std::fmt::Debug for Reranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reranker")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.is_model_loaded())
            .finish()
    }
}

impl Reranker {
    pub fn load(config: RerankerConfig) -> Result<Self, RerankerError> {
        if let Err(msg) = config.validate() {
            return Err(RerankerError::InvalidConfig { reason: msg });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for reranker");

        let Some(model_path) = config.model_path.clone() else {
            info!("No reranker model path configured, operating in stub mode");
            return Ok(Self {
                device,
                config,
                model: None,
                tokenizer: None,
            });
        };

        if !model_path.exists() {
            return Err(RerankerError::ModelNotFound { path: model_path });
        }

        let missing = missing_model_files(&model_path);
        if !missing.is_empty() {
            return Err(RerankerError::IncompleteModel {
                path: model_path,
                missing,
            });
        }

        info!(model_path = %model_path.display(), "Loading reranker model");

        let model = BertClassifier::load(&model_path, &device).map_err(|e| {
            RerankerError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {}", e),
            }
        })?;

        let tokenizer = load_tokenizer(&model_path, config.max_seq_len).map_err(|e| {
            RerankerError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(
            apply_sigmoid = config.apply_sigmoid,
            "Reranker model loaded successfully"
        );

        Ok(Self {
            device,
            config,
            model: Some(model),
            tokenizer: Some(tokenizer),
        })
    }

    pub fn stub() -> Result<Self, RerankerError> {
        Self::load(RerankerConfig::stub())
    }

    pub fn score(&self, query: &str, passage: &str) -> Result<f32, RerankerError> {
        let (Some(model), Some(tokenizer)) = (&self.model, &self.tokenizer) else {
            let score = overlap_score(query, passage);
            debug!(score = score, "Computed score (stub)");
            return Ok(score);
        };

        let tokens = tokenizer.encode((query, passage), true).map_err(|e| {
            RerankerError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        let token_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(tokens.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(tokens.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = model
            .forward(&token_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| RerankerError::InferenceFailed {
                reason: e.to_string(),
            })?;

        let logit = logits
            .flatten_all()?
            .to_vec1::<f32>()?
            .first()
            .copied()
            .ok_or_else(|| RerankerError::InferenceFailed {
                reason: "model returned no logits".to_string(),
            })?;

        if self.config.apply_sigmoid {
            Ok(sigmoid(logit))
        } else {
            Ok(logit)
        }
    }

    /// Scores every passage against `query`, preserving input order.
    pub fn score_batch(&self, query: &str, passages: &[&str]) -> Result<Vec<f32>, RerankerError> {
        debug!(
            query_len = query.len(),
            num_passages = passages.len(),
            model_loaded = self.is_model_loaded(),
            "Scoring passage batch"
        );

        passages
            .iter()
            .map(|passage| self.score(query, passage))
            .collect()
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &RerankerConfig {
        &self.config
    }

    pub fn device(&self) -> &candle_core::Device {
        &self.device
    }
}

#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Recall/Jaccard blend over content words, squashed into `[0, 1]`.
fn overlap_score(query: &str, passage: &str) -> f32 {
    let query_lower = query.to_lowercase();
    let query_words: HashSet<&str> = query_lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !is_stop_word(w))
        .collect();

    let passage_lower = passage.to_lowercase();
    let passage_words: HashSet<&str> = passage_lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !is_stop_word(w))
        .collect();

    if query_words.is_empty() {
        let len_ratio = (query.len().min(passage.len()) as f32)
            / (query.len().max(passage.len()).max(1) as f32);
        return len_ratio * 0.3;
    }

    let matches = query_words.intersection(&passage_words).count();
    let recall = matches as f32 / query_words.len() as f32;

    let union = query_words.union(&passage_words).count();
    let jaccard = if union > 0 {
        matches as f32 / union as f32
    } else {
        0.0
    };

    let base_score = 0.6 * recall + 0.4 * jaccard;

    sigmoid(8.0 * (base_score - 0.5)).clamp(0.0, 1.0)
}
