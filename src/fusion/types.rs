use serde::{Deserialize, Serialize};

use crate::retrieval::RetrievalHit;

/// A retrieved chunk with whatever raw scores each signal reported for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Stable chunk id assigned at ingestion.
    pub id: String,
    pub text: String,
    pub doc_ref: String,
    pub vector_raw: Option<f32>,
    pub lexical_raw: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
/// A retrieval hit rescaled onto `[0, 1]`, higher is better.
pub struct NormalizedHit {
    pub chunk_id: String,
    pub text: String,
    pub doc_ref: String,
    /// Score as reported by the backend.
    pub raw_score: f32,
    /// Score after normalization.
    pub score: f32,
}

impl NormalizedHit {
    pub(crate) fn from_hit(hit: RetrievalHit, score: f32) -> Self {
        Self {
            chunk_id: hit.chunk_id,
            text: hit.text,
            doc_ref: hit.doc_ref,
            raw_score: hit.raw_score,
            score,
        }
    }

    /// Builds an already-normalized hit.
    pub fn new(
        chunk_id: impl Into<String>,
        text: impl Into<String>,
        doc_ref: impl Into<String>,
        score: f32,
    ) -> Self {
        Self {
            chunk_id: chunk_id.into(),
            text: text.into(),
            doc_ref: doc_ref.into(),
            raw_score: score,
            score,
        }
    }
}

/// A deduplicated chunk after fusing both signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub chunk: Chunk,
    pub from_vector: bool,
    pub from_lexical: bool,
    /// Normalized vector score, `0.0` when absent.
    pub vector_score: f32,
    /// Normalized lexical score, `0.0` when absent.
    pub lexical_score: f32,
    pub fused_score: f32,
}

impl Candidate {
    pub fn id(&self) -> &str {
        &self.chunk.id
    }

    pub fn doc_ref(&self) -> &str {
        &self.chunk.doc_ref
    }

    pub fn text(&self) -> &str {
        &self.chunk.text
    }

    /// `true` when both signals retrieved this chunk.
    pub fn is_hybrid(&self) -> bool {
        self.from_vector && self.from_lexical
    }
}
