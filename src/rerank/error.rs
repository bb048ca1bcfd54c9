use thiserror::Error;

use crate::embedding::RerankerError;

#[derive(Debug, Error)]
pub enum RerankError {
    #[error("reranker unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("reranker error: {0}")]
    Reranker(#[from] RerankerError),

    #[error("rerank task failed: {reason}")]
    TaskFailed { reason: String },

    #[error("incomplete scores: {reason}")]
    IncompleteScores { reason: String },
}
