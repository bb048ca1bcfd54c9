//! Cross-cutting, shared constants.
//!
//! Engine defaults mirror the retrieval pool sizes and cut-offs the pipeline was tuned with:
//! a wide hybrid pool per signal, reranked down to a small evidence set.

/// Candidates requested from each retrieval signal.
pub const DEFAULT_RETRIEVAL_K: usize = 50;

/// Maximum usable evidence items handed to prompt assembly.
pub const DEFAULT_EVIDENCE_CAP: usize = 10;

/// Minimum reranked relevance for evidence to be usable.
///
/// Equivalent to accepting cross-encoder distances up to `0.9`.
pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 0.10;

pub const DEFAULT_CONFIDENCE_HIGH: f32 = 0.60;

pub const DEFAULT_CONFIDENCE_MEDIUM: f32 = 0.30;

/// Number of leading usable items inspected for independent corroboration.
pub const DEFAULT_CORROBORATION_WINDOW: usize = 3;

pub const DEFAULT_RERANK_BATCH_SIZE: usize = 16;

pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 30_000;

/// Cross-encoder maximum sequence length (query + passage tokens).
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Output dimension of the default sentence encoder (MiniLM-L6).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

pub const DEFAULT_QDRANT_COLLECTION: &str = "verdict_chunks";

/// Stop words ignored by lexical heuristics (stub scoring, coverage analysis).
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall",
    "can", "need", "dare", "ought", "used", "to", "of", "in", "for", "on", "with", "at", "by",
    "from", "as", "into", "through", "during", "before", "after", "above", "below", "between",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "just", "and", "but", "if", "or", "because",
    "until", "while", "what", "which", "who", "whom", "this", "that", "these", "those", "am",
    "it", "its", "about", "tell", "me", "explain", "describe",
];

/// Returns `true` if `word` (already lower-cased) is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}
