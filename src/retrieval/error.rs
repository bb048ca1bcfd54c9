use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
/// Errors returned by retrieval backends.
pub enum SearchError {
    /// Backend is not reachable or not configured.
    #[error("{backend} backend unavailable: {reason}")]
    Unavailable {
        /// Backend name.
        backend: &'static str,
        /// Why it is unavailable.
        reason: String,
    },

    /// The backend accepted the request but the search failed.
    #[error("{backend} search failed: {message}")]
    SearchFailed {
        /// Backend name.
        backend: &'static str,
        /// Error message.
        message: String,
    },

    /// The query could not be embedded.
    #[error("query encoding failed: {0}")]
    Encoding(#[from] EmbeddingError),
}
