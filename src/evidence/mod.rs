//! Usable/ignored partition of the reranked candidates.


use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rerank::RerankedCandidate;

/// Reranked candidates split into the evidence the answer may rely on and the rest.
///
/// Both halves keep reranked order; together they are exactly the reranked set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceBundle {
    usable: Vec<RerankedCandidate>,
    ignored: Vec<RerankedCandidate>,
}

/// Usable evidence from one source document, in reranked order.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentEvidence<'a> {
    pub doc_ref: &'a str,
    pub items: Vec<&'a RerankedCandidate>,
}

impl EvidenceBundle {
    pub fn usable(&self) -> &[RerankedCandidate] {
        &self.usable
    }

    pub fn ignored(&self) -> &[RerankedCandidate] {
        &self.ignored
    }

    pub fn has_usable(&self) -> bool {
        !self.usable.is_empty()
    }

    pub fn len(&self) -> usize {
        self.usable.len() + self.ignored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.usable.is_empty() && self.ignored.is_empty()
    }

    /// Number of distinct `doc_ref`s among usable evidence.
    pub fn distinct_sources(&self) -> usize {
        self.by_document().len()
    }

    /// Groups usable evidence by document, documents in first-appearance order.
    pub fn by_document(&self) -> Vec<DocumentEvidence<'_>> {
        let mut groups: Vec<DocumentEvidence<'_>> = Vec::new();
        for item in &self.usable {
            match groups.iter_mut().find(|g| g.doc_ref == item.doc_ref()) {
                Some(group) => group.items.push(item),
                None => groups.push(DocumentEvidence {
                    doc_ref: item.doc_ref(),
                    items: vec![item],
                }),
            }
        }
        groups
    }
}

/// Takes the leading run of candidates with `relevance >= threshold`, at most `cap` of
/// them, as usable. Everything after is ignored.
pub fn select_evidence(ranked: Vec<RerankedCandidate>, cap: usize, threshold: f32) -> EvidenceBundle {
    let total = ranked.len();
    let mut usable = Vec::with_capacity(cap.min(total));
    let mut ignored = Vec::new();
    let mut open = true;

    for candidate in ranked {
        if open && usable.len() < cap && candidate.meets(threshold) {
            usable.push(candidate);
        } else {
            open = false;
            ignored.push(candidate);
        }
    }

    debug!(
        total = total,
        usable = usable.len(),
        ignored = ignored.len(),
        cap = cap,
        threshold = threshold,
        "Selected evidence"
    );

    EvidenceBundle { usable, ignored }
}
