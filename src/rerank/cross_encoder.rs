use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::error::RerankError;
use super::types::Passage;
use super::RerankScorer;
use crate::embedding::{Reranker, RerankerConfig};

/// [`RerankScorer`] backed by the candle cross-encoder.
///
/// Each call runs on a blocking thread; the adapter issues one call per batch.
#[derive(Clone)]
pub struct CrossEncoderScorer {
    reranker: Arc<Reranker>,
}

impl std::fmt::Debug for CrossEncoderScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossEncoderScorer")
            .field("reranker", &self.reranker)
            .finish()
    }
}

impl CrossEncoderScorer {
    pub fn new(config: RerankerConfig) -> Result<Self, RerankError> {
        let reranker = Reranker::load(config)?;
        Ok(Self {
            reranker: Arc::new(reranker),
        })
    }

    pub fn stub() -> Result<Self, RerankError> {
        Ok(Self {
            reranker: Arc::new(Reranker::stub()?),
        })
    }

    pub fn is_model_loaded(&self) -> bool {
        self.reranker.is_model_loaded()
    }

    pub fn reranker(&self) -> &Reranker {
        &self.reranker
    }
}

impl RerankScorer for CrossEncoderScorer {
    async fn rerank(
        &self,
        query: &str,
        passages: &[Passage],
    ) -> Result<HashMap<String, f32>, RerankError> {
        if passages.is_empty() {
            return Ok(HashMap::new());
        }

        let reranker = Arc::clone(&self.reranker);
        let query = query.to_string();
        let batch = passages.to_vec();

        let scored = tokio::task::spawn_blocking(move || {
            let texts: Vec<&str> = batch.iter().map(|p| p.text.as_str()).collect();
            let scores = reranker.score_batch(&query, &texts)?;
            Ok::<_, RerankError>(
                batch
                    .into_iter()
                    .map(|p| p.chunk_id)
                    .zip(scores)
                    .collect::<HashMap<String, f32>>(),
            )
        })
        .await
        .map_err(|e| RerankError::TaskFailed {
            reason: e.to_string(),
        })??;

        debug!(batch = scored.len(), "Scored rerank batch");
        Ok(scored)
    }
}

/// Scorer for deployments without a cross-encoder; every call fails.
#[derive(Debug, Clone, Default)]
pub struct UnavailableReranker;

impl RerankScorer for UnavailableReranker {
    async fn rerank(
        &self,
        _query: &str,
        _passages: &[Passage],
    ) -> Result<HashMap<String, f32>, RerankError> {
        Err(RerankError::Unavailable {
            reason: "no cross-encoder configured".to_string(),
        })
    }
}
