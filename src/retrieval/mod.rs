//! Retrieval backends feeding the fusion stage.
//!
//! The engine only depends on [`VectorSearch`] and [`LexicalSearch`]. Concrete backends:
//!
//! - [`Bm25Index`]: in-memory BM25 over loaded chunks.
//! - [`MemoryVectorIndex`]: in-memory cosine search over encoder embeddings.
//! - [`QdrantVectorSearch`]: Qdrant collection whose payload carries the chunk fields.

pub mod backend;
pub mod bm25;
pub mod error;
pub mod memory;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod qdrant;

#[cfg(test)]
mod tests;

pub use backend::VectorBackend;
pub use bm25::{BM25_B, BM25_K1, Bm25Index};
pub use error::SearchError;
pub use memory::{MemoryVectorIndex, cosine_similarity};
#[cfg(any(test, feature = "mock"))]
pub use mock::{FailingSearch, StaticSearch};
pub use qdrant::QdrantVectorSearch;

use std::future::Future;

use serde::{Deserialize, Serialize};

/// One scored chunk as returned by a retrieval backend.
///
/// `raw_score` is in the backend's native scale (cosine similarity, distance, BM25).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalHit {
    pub chunk_id: String,
    pub text: String,
    pub doc_ref: String,
    pub raw_score: f32,
}

impl RetrievalHit {
    pub fn new(
        chunk_id: impl Into<String>,
        text: impl Into<String>,
        doc_ref: impl Into<String>,
        raw_score: f32,
    ) -> Self {
        Self {
            chunk_id: chunk_id.into(),
            text: text.into(),
            doc_ref: doc_ref.into(),
            raw_score,
        }
    }
}

/// The two independent retrieval signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Vector,
    Lexical,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Vector => write!(f, "vector"),
            Signal::Lexical => write!(f, "lexical"),
        }
    }
}

/// Semantic (embedding) search.
pub trait VectorSearch: Send + Sync {
    /// Returns up to `k` hits ordered best-first.
    fn vector_search(
        &self,
        query: &str,
        k: usize,
    ) -> impl Future<Output = Result<Vec<RetrievalHit>, SearchError>> + Send;
}

/// Keyword (BM25) search.
pub trait LexicalSearch: Send + Sync {
    /// Returns up to `k` hits ordered best-first.
    fn lexical_search(
        &self,
        query: &str,
        k: usize,
    ) -> impl Future<Output = Result<Vec<RetrievalHit>, SearchError>> + Send;
}

/// Splits text into lower-cased alphanumeric tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}
