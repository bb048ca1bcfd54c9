//! Query orchestration: retrieval through to the [`DecisionTrace`].
//!
//! ```text
//! vector ─┐
//!         ├─ normalize ─ fuse ─ rerank ─ select ─┬─ confidence ─┐
//! lexical ┘                                      └─ gaps ───────┴─ verdict ─ trace
//! ```
//!
//! Backend failures degrade the pipeline and are noted on the trace. Only a timeout,
//! a cancellation, an empty query or an invalid [`EngineConfig`] yield an error.

pub mod error;


pub use error::EngineError;

use std::future::Future;

use tracing::{debug, info, instrument, warn};

use crate::confidence::estimate_confidence;
use crate::config::EngineConfig;
use crate::evidence::select_evidence;
use crate::fusion::{ScoreDirection, assert_unique_ids, fuse, normalize};
use crate::guardrail::{CoverageStrategy, TermCoverage, analyze_gaps, assess};
use crate::rerank::{RerankScorer, rerank_candidates};
use crate::retrieval::{LexicalSearch, RetrievalHit, SearchError, Signal, VectorSearch};
use crate::trace::{DecisionTrace, TraceNote};

/// Builds decision traces from two retrieval backends and a reranker.
///
/// Holds no per-query state; one engine can serve concurrent queries.
pub struct DecisionEngine<V, L, R, C = TermCoverage> {
    vector: V,
    lexical: L,
    reranker: R,
    coverage: C,
}

impl<V, L, R, C> std::fmt::Debug for DecisionEngine<V, L, R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("vector", &std::any::type_name::<V>())
            .field("lexical", &std::any::type_name::<L>())
            .field("reranker", &std::any::type_name::<R>())
            .field("coverage", &std::any::type_name::<C>())
            .finish()
    }
}

impl<V, L, R> DecisionEngine<V, L, R, TermCoverage>
where
    V: VectorSearch,
    L: LexicalSearch,
    R: RerankScorer,
{
    pub fn new(vector: V, lexical: L, reranker: R) -> Self {
        Self {
            vector,
            lexical,
            reranker,
            coverage: TermCoverage::default(),
        }
    }
}

impl<V, L, R, C> DecisionEngine<V, L, R, C>
where
    V: VectorSearch,
    L: LexicalSearch,
    R: RerankScorer,
    C: CoverageStrategy,
{
    /// Replaces the gap-detection strategy.
    pub fn with_coverage<C2: CoverageStrategy>(self, coverage: C2) -> DecisionEngine<V, L, R, C2> {
        DecisionEngine {
            vector: self.vector,
            lexical: self.lexical,
            reranker: self.reranker,
            coverage,
        }
    }

    pub fn vector(&self) -> &V {
        &self.vector
    }

    pub fn lexical(&self) -> &L {
        &self.lexical
    }

    pub fn reranker(&self) -> &R {
        &self.reranker
    }

    /// Runs the full pipeline under `config.query_timeout`.
    pub async fn build_decision_trace(
        &self,
        query: &str,
        config: &EngineConfig,
    ) -> Result<DecisionTrace, EngineError> {
        self.build_decision_trace_until(query, config, std::future::pending::<()>())
            .await
    }

    /// Like [`build_decision_trace`](Self::build_decision_trace), but abandons the query
    /// as soon as `cancel` completes.
    #[instrument(skip(self, query, config, cancel), fields(query_len = query.len()))]
    pub async fn build_decision_trace_until<F>(
        &self,
        query: &str,
        config: &EngineConfig,
        cancel: F,
    ) -> Result<DecisionTrace, EngineError>
    where
        F: Future<Output = ()>,
    {
        config.validate()?;
        if query.trim().is_empty() {
            return Err(EngineError::EmptyQuery);
        }

        let timeout_ms = config.query_timeout.as_millis() as u64;

        tokio::select! {
            biased;

            _ = cancel => {
                warn!("Query cancelled, abandoning in-flight work");
                Err(EngineError::Cancelled)
            }
            result = tokio::time::timeout(config.query_timeout, self.run(query, config)) => {
                result.map_err(|_| {
                    warn!(timeout_ms = timeout_ms, "Query deadline exceeded");
                    EngineError::Timeout { timeout_ms }
                })
            }
        }
    }

    async fn run(&self, query: &str, config: &EngineConfig) -> DecisionTrace {
        let (vector_result, lexical_result) = tokio::join!(
            self.vector.vector_search(query, config.vector_k),
            self.lexical.lexical_search(query, config.lexical_k),
        );

        let mut notes = Vec::new();
        let vector_hits = signal_hits(Signal::Vector, vector_result, &mut notes);
        let lexical_hits = signal_hits(Signal::Lexical, lexical_result, &mut notes);

        let vector = normalize(
            Signal::Vector,
            vector_hits,
            config.normalization,
            config.vector_score_kind.direction(),
        );
        let lexical = normalize(
            Signal::Lexical,
            lexical_hits,
            config.normalization,
            ScoreDirection::HigherIsBetter,
        );

        let candidates = fuse(&vector, &lexical, config.fusion_weights);
        assert_unique_ids(&candidates);

        let reranked =
            rerank_candidates(&self.reranker, query, candidates, config.rerank_batch_size).await;
        if let Some(reason) = reranked.degraded {
            notes.push(TraceNote::DegradedReranking { reason });
        }

        let evidence = select_evidence(
            reranked.ranked,
            config.evidence_cap,
            config.relevance_threshold,
        );

        let (confidence, gaps) = tokio::join!(
            async {
                estimate_confidence(
                    &evidence,
                    config.confidence_thresholds,
                    config.corroboration_window,
                )
            },
            async { analyze_gaps(query, &evidence, &self.coverage) },
        );
        let outcome = assess(&evidence, &confidence, gaps);

        info!(
            fingerprint = %crate::hashing::query_fingerprint(query),
            usable = evidence.usable().len(),
            ignored = evidence.ignored().len(),
            confidence = %confidence.label,
            sufficiency = %outcome.sufficiency,
            degraded = !notes.is_empty(),
            "Decision trace built"
        );

        DecisionTrace::build(
            query,
            evidence,
            confidence,
            outcome.sufficiency,
            outcome.gaps,
            notes,
        )
    }
}

fn signal_hits(
    signal: Signal,
    result: Result<Vec<RetrievalHit>, SearchError>,
    notes: &mut Vec<TraceNote>,
) -> Vec<RetrievalHit> {
    match result {
        Ok(hits) => {
            debug!(signal = %signal, hits = hits.len(), "Retrieval complete");
            hits
        }
        Err(e) => {
            warn!(signal = %signal, error = %e, "Retrieval failed, continuing without signal");
            notes.push(TraceNote::DegradedFusion {
                signal,
                reason: e.to_string(),
            });
            Vec::new()
        }
    }
}
