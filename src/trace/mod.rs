//! The immutable per-query decision record.


use std::fmt;

use serde::{Deserialize, Serialize};

use crate::confidence::ConfidenceSignal;
use crate::evidence::EvidenceBundle;
use crate::guardrail::{GapNote, Sufficiency};
use crate::hashing::query_fingerprint;
use crate::rerank::RerankedCandidate;
use crate::retrieval::{Signal, tokenize};

/// What kind of answer the query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryIntent {
    /// A specific fact.
    Factual,
    /// Themes, main points or a summary across evidence.
    Synthesis,
}

const SYNTHESIS_TERMS: &[&str] = &[
    "theme",
    "themes",
    "overall",
    "main",
    "summary",
    "summarize",
    "summarise",
];

impl QueryIntent {
    pub fn classify(query: &str) -> Self {
        if tokenize(query)
            .iter()
            .any(|t| SYNTHESIS_TERMS.contains(&t.as_str()))
        {
            QueryIntent::Synthesis
        } else {
            QueryIntent::Factual
        }
    }
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryIntent::Factual => write!(f, "factual"),
            QueryIntent::Synthesis => write!(f, "synthesis"),
        }
    }
}

/// Pipeline-level events worth surfacing next to the evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceNote {
    /// One retrieval signal failed; fusion used the other alone.
    DegradedFusion { signal: Signal, reason: String },
    /// The cross-encoder failed; candidates kept their fused order.
    DegradedReranking { reason: String },
}

impl fmt::Display for TraceNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceNote::DegradedFusion { signal, reason } => {
                write!(f, "{} retrieval unavailable, fused without it: {}", signal, reason)
            }
            TraceNote::DegradedReranking { reason } => {
                write!(f, "reranking unavailable, using fused order: {}", reason)
            }
        }
    }
}

/// Everything decided for one query.
///
/// Built once by [`DecisionTrace::build`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionTrace {
    query: String,
    query_fingerprint: String,
    intent: QueryIntent,
    evidence: EvidenceBundle,
    confidence: ConfidenceSignal,
    sufficiency: Sufficiency,
    gaps: Vec<GapNote>,
    notes: Vec<TraceNote>,
}

impl DecisionTrace {
    pub fn build(
        query: &str,
        evidence: EvidenceBundle,
        confidence: ConfidenceSignal,
        sufficiency: Sufficiency,
        gaps: Vec<GapNote>,
        notes: Vec<TraceNote>,
    ) -> Self {
        Self {
            query: query.to_string(),
            query_fingerprint: query_fingerprint(query),
            intent: QueryIntent::classify(query),
            evidence,
            confidence,
            sufficiency,
            gaps,
            notes,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// BLAKE3 hex digest of the query.
    pub fn query_fingerprint(&self) -> &str {
        &self.query_fingerprint
    }

    pub fn intent(&self) -> QueryIntent {
        self.intent
    }

    pub fn evidence(&self) -> &EvidenceBundle {
        &self.evidence
    }

    pub fn usable(&self) -> &[RerankedCandidate] {
        self.evidence.usable()
    }

    pub fn ignored(&self) -> &[RerankedCandidate] {
        self.evidence.ignored()
    }

    pub fn confidence(&self) -> &ConfidenceSignal {
        &self.confidence
    }

    pub fn sufficiency(&self) -> Sufficiency {
        self.sufficiency
    }

    pub fn gaps(&self) -> &[GapNote] {
        &self.gaps
    }

    pub fn notes(&self) -> &[TraceNote] {
        &self.notes
    }

    pub fn is_degraded(&self) -> bool {
        !self.notes.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn write_evidence(f: &mut fmt::Formatter<'_>, item: &RerankedCandidate) -> fmt::Result {
    writeln!(
        f,
        "- {} [{}], relevance={:.3}, fused={:.3}",
        item.doc_ref(),
        item.id(),
        item.relevance,
        item.fused_score()
    )
}

impl fmt::Display for DecisionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Decision Trace ---")?;
        writeln!(f, "Query: {}", self.query)?;
        writeln!(f, "Intent: {}", self.intent)?;
        writeln!(
            f,
            "Confidence: {} ({:.3})",
            self.confidence.label, self.confidence.score
        )?;
        writeln!(f, "Sufficiency: {}", self.sufficiency)?;

        writeln!(f)?;
        writeln!(f, "Used Evidence:")?;
        if self.evidence.usable().is_empty() {
            writeln!(f, "- (none)")?;
        }
        for item in self.evidence.usable() {
            write_evidence(f, item)?;
        }

        if !self.evidence.ignored().is_empty() {
            writeln!(f)?;
            writeln!(f, "Ignored Evidence:")?;
            for item in self.evidence.ignored() {
                write_evidence(f, item)?;
            }
        }

        if !self.gaps.is_empty() {
            writeln!(f)?;
            writeln!(f, "Gaps:")?;
            for gap in &self.gaps {
                writeln!(f, "- {}", gap)?;
            }
        }

        if !self.notes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Notes:")?;
            for note in &self.notes {
                writeln!(f, "- {}", note)?;
            }
        }

        write!(f, "----------------------")
    }
}
