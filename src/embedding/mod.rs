//! Model-backed text scoring.
//!
//! - [`encoder`] embeds queries and chunks for the vector backends.
//! - [`reranker`] provides the cross-encoder used by [`crate::rerank`].

/// BERT classifier and sentence-model wrappers.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Sentence encoder.
pub mod encoder;
mod error;
/// Cross-encoder reranker.
pub mod reranker;
/// Tokenizer/model loading helpers.
pub mod utils;

pub use encoder::{BertEncoder, ENCODER_EMBEDDING_DIM, EncoderConfig, QueryEncoder};
pub use error::EmbeddingError;
pub use reranker::{Reranker, RerankerConfig, RerankerError, sigmoid};
