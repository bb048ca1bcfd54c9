//! Verdict library crate (used by the CLI and integration tests).
//!
//! Turns a question into a [`DecisionTrace`]: the evidence an answer may rely on, the
//! evidence that was discarded, a confidence signal, a sufficiency verdict and the gaps
//! that explain it.
//!
//! # Public API Surface
//!
//! ## Engine
//! - [`DecisionEngine`], [`EngineConfig`], [`EngineError`]: query orchestration
//! - [`DecisionTrace`], [`TraceNote`], [`QueryIntent`]: the per-query record
//!
//! ## Pipeline stages
//! - [`normalize`], [`fuse`], [`Candidate`]: score normalization and hybrid fusion
//! - [`RerankScorer`], [`CrossEncoderScorer`], [`rerank_candidates`]: reranking
//! - [`select_evidence`], [`EvidenceBundle`]: usable/ignored partition
//! - [`estimate_confidence`], [`ConfidenceSignal`]: confidence heuristic
//! - [`CoverageStrategy`], [`TermCoverage`], [`Sufficiency`], [`GapNote`]: guardrails
//!
//! ## Backends
//! - [`VectorSearch`], [`LexicalSearch`]: retrieval interfaces
//! - [`Bm25Index`], [`MemoryVectorIndex`], [`QdrantVectorSearch`]: shipped backends
//! - [`BertEncoder`], [`Reranker`]: candle models (with stub modes)
//! - [`load_corpus`]: pre-chunked JSON-lines loader
//!
//! ## Test/Mock Support
//! Mock backends are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod confidence;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod embedding;
pub mod engine;
pub mod evidence;
pub mod fusion;
pub mod guardrail;
pub mod hashing;
pub mod rerank;
pub mod retrieval;
pub mod trace;

pub use confidence::{ConfidenceLabel, ConfidenceSignal, estimate_confidence};
pub use config::{ConfidenceThresholds, Config, ConfigError, EngineConfig, FusionWeights};
pub use corpus::{ChunkRecord, CorpusError, load_corpus, parse_corpus};
pub use embedding::{
    BertEncoder, EmbeddingError, EncoderConfig, QueryEncoder, Reranker, RerankerConfig,
    RerankerError,
};
pub use engine::{DecisionEngine, EngineError};
pub use evidence::{DocumentEvidence, EvidenceBundle, select_evidence};
pub use fusion::{
    Candidate, Chunk, NormalizationPolicy, NormalizedHit, ScoreDirection, VectorScoreKind, fuse,
    normalize,
};
pub use guardrail::{
    CoverageStrategy, GapKind, GapNote, GuardrailOutcome, Sufficiency, SufficiencyRule,
    TermCoverage,
};
pub use hashing::{derive_chunk_id, query_fingerprint};
pub use rerank::{
    CrossEncoderScorer, Passage, RerankError, RerankOutcome, RerankScorer, RerankedCandidate,
    UnavailableReranker, rerank_candidates,
};
#[cfg(any(test, feature = "mock"))]
pub use rerank::{FailingScorer, StaticScorer};
pub use retrieval::{
    Bm25Index, LexicalSearch, MemoryVectorIndex, QdrantVectorSearch, RetrievalHit, SearchError,
    Signal, VectorBackend, VectorSearch,
};
#[cfg(any(test, feature = "mock"))]
pub use retrieval::{FailingSearch, StaticSearch};
pub use trace::{DecisionTrace, QueryIntent, TraceNote};
