use std::collections::HashMap;

use futures_util::future::try_join_all;
use tracing::{debug, warn};

use super::error::RerankError;
use super::types::{Passage, RerankedCandidate, rerank_order};
use super::RerankScorer;
use crate::fusion::Candidate;

/// Result of the rerank stage.
#[derive(Debug, Clone, PartialEq)]
pub struct RerankOutcome {
    pub ranked: Vec<RerankedCandidate>,
    /// Why the cross-encoder was bypassed, if it was.
    pub degraded: Option<String>,
}

impl RerankOutcome {
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

/// Scores `candidates` in batches of `batch_size` and orders them by relevance.
///
/// Batches run concurrently; the final order depends only on the scores. If any batch
/// fails, or a candidate comes back without a finite score, every candidate falls back
/// to `relevance = fused_score` and the outcome is marked degraded.
pub async fn rerank_candidates<R: RerankScorer>(
    scorer: &R,
    query: &str,
    candidates: Vec<Candidate>,
    batch_size: usize,
) -> RerankOutcome {
    if candidates.is_empty() {
        return RerankOutcome {
            ranked: Vec::new(),
            degraded: None,
        };
    }

    let passages: Vec<Passage> = candidates.iter().map(Passage::from).collect();
    let batches = passages.chunks(batch_size.max(1));
    let num_batches = batches.len();

    debug!(
        candidates = candidates.len(),
        batches = num_batches,
        "Reranking candidates"
    );

    let scored = try_join_all(batches.map(|batch| scorer.rerank(query, batch)))
        .await
        .and_then(|maps| complete_scores(&candidates, maps));

    let (mut ranked, degraded): (Vec<RerankedCandidate>, Option<String>) = match scored {
        Ok(scores) => {
            let ranked = candidates
                .into_iter()
                .map(|candidate| {
                    let relevance = scores
                        .get(candidate.id())
                        .copied()
                        .unwrap_or(candidate.fused_score);
                    RerankedCandidate::new(candidate, relevance)
                })
                .collect();
            (ranked, None)
        }
        Err(e) => {
            warn!(error = %e, "Reranking unavailable, falling back to fused order");
            let ranked = candidates
                .into_iter()
                .map(|candidate| {
                    let relevance = candidate.fused_score;
                    RerankedCandidate::new(candidate, relevance)
                })
                .collect();
            (ranked, Some(e.to_string()))
        }
    };

    ranked.sort_by(rerank_order);
    assert_rerank_order(&ranked);

    if let Some(top) = ranked.first() {
        debug!(
            top_id = %top.id(),
            top_relevance = top.relevance,
            degraded = degraded.is_some(),
            "Top candidate after reranking"
        );
    }

    RerankOutcome { ranked, degraded }
}

fn complete_scores(
    candidates: &[Candidate],
    maps: Vec<HashMap<String, f32>>,
) -> Result<HashMap<String, f32>, RerankError> {
    let mut merged: HashMap<String, f32> = HashMap::with_capacity(candidates.len());
    for map in maps {
        merged.extend(map);
    }

    for candidate in candidates {
        match merged.get(candidate.id()) {
            None => {
                return Err(RerankError::IncompleteScores {
                    reason: format!("no score for chunk '{}'", candidate.id()),
                });
            }
            Some(score) if !score.is_finite() => {
                return Err(RerankError::IncompleteScores {
                    reason: format!("non-finite score for chunk '{}'", candidate.id()),
                });
            }
            Some(_) => {}
        }
    }

    Ok(merged)
}

/// Panics unless adjacent candidates are in [`rerank_order`].
pub fn assert_rerank_order(ranked: &[RerankedCandidate]) {
    for pair in ranked.windows(2) {
        assert!(
            rerank_order(&pair[0], &pair[1]) != std::cmp::Ordering::Greater,
            "reranked order violated between '{}' and '{}'",
            pair[0].id(),
            pair[1].id()
        );
    }
}
