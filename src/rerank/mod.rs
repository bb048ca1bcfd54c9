//! Cross-encoder reranking of fused candidates.
//!
//! The engine only sees [`RerankScorer`]. [`rerank_candidates`] splits the candidate set
//! into batches, scores them concurrently and sorts by relevance. When scoring fails it
//! degrades to the fused order instead of failing the query.

pub mod adapter;
pub mod cross_encoder;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod types;


pub use adapter::{RerankOutcome, assert_rerank_order, rerank_candidates};
pub use cross_encoder::{CrossEncoderScorer, UnavailableReranker};
pub use error::RerankError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{FailingScorer, StaticScorer};
pub use types::{Passage, RerankedCandidate, rerank_order};

use std::collections::HashMap;
use std::future::Future;

/// Scores `(query, passage)` pairs.
pub trait RerankScorer: Send + Sync {
    /// Returns a relevance score per `chunk_id`.
    ///
    /// Missing ids are treated as a scoring failure by the adapter.
    fn rerank(
        &self,
        query: &str,
        passages: &[Passage],
    ) -> impl Future<Output = Result<HashMap<String, f32>, RerankError>> + Send;
}
