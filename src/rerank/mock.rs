use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::error::RerankError;
use super::types::Passage;
use super::RerankScorer;

/// Returns preset scores per chunk id; ids without a preset get no score.
#[derive(Debug, Default)]
pub struct StaticScorer {
    scores: HashMap<String, f32>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StaticScorer {
    pub fn new<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        Self {
            scores: scores.into_iter().map(|(id, s)| (id.into(), s)).collect(),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of batches scored so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RerankScorer for StaticScorer {
    async fn rerank(
        &self,
        _query: &str,
        passages: &[Passage],
    ) -> Result<HashMap<String, f32>, RerankError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        Ok(passages
            .iter()
            .filter_map(|p| {
                self.scores
                    .get(&p.chunk_id)
                    .map(|score| (p.chunk_id.clone(), *score))
            })
            .collect())
    }
}

/// Fails every call with the given error message.
#[derive(Debug, Clone)]
pub struct FailingScorer {
    reason: String,
}

impl FailingScorer {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl RerankScorer for FailingScorer {
    async fn rerank(
        &self,
        _query: &str,
        _passages: &[Passage],
    ) -> Result<HashMap<String, f32>, RerankError> {
        Err(RerankError::TaskFailed {
            reason: self.reason.clone(),
        })
    }
}
