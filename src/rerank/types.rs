use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::fusion::Candidate;

/// Text handed to a cross-encoder, keyed by chunk id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    pub chunk_id: String,
    pub text: String,
}

impl Passage {
    pub fn new(chunk_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chunk_id: chunk_id.into(),
            text: text.into(),
        }
    }
}

impl From<&Candidate> for Passage {
    fn from(candidate: &Candidate) -> Self {
        Self::new(candidate.id(), candidate.text())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Fused candidate annotated with its cross-encoder relevance.
pub struct RerankedCandidate {
    pub candidate: Candidate,
    pub relevance: f32,
}

impl RerankedCandidate {
    pub fn new(candidate: Candidate, relevance: f32) -> Self {
        Self {
            candidate,
            relevance,
        }
    }

    pub fn id(&self) -> &str {
        self.candidate.id()
    }

    pub fn doc_ref(&self) -> &str {
        self.candidate.doc_ref()
    }

    pub fn text(&self) -> &str {
        self.candidate.text()
    }

    pub fn fused_score(&self) -> f32 {
        self.candidate.fused_score
    }

    /// `true` if `relevance` is at least `threshold`.
    pub fn meets(&self, threshold: f32) -> bool {
        self.relevance >= threshold
    }
}

/// Relevance descending, then fused score descending, then chunk id ascending.
pub fn rerank_order(a: &RerankedCandidate, b: &RerankedCandidate) -> Ordering {
    b.relevance
        .partial_cmp(&a.relevance)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            b.fused_score()
                .partial_cmp(&a.fused_score())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.id().cmp(b.id()))
}
