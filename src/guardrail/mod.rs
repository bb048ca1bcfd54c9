//! Sufficiency verdict and evidence-gap notes.
//!
//! Gap analysis only needs the evidence, so it runs alongside confidence estimation;
//! [`assess`] combines both into the verdict.
//!
//! Rules, first match wins:
//!
//! 1. no usable evidence: `INSUFFICIENT`
//! 2. confidence label `low`: `PARTIAL`
//! 3. otherwise `SUFFICIENT`

pub mod coverage;
pub mod types;

#[cfg(test)]
mod tests;

pub use coverage::{CoverageStrategy, TermCoverage};
pub use types::{GapKind, GapNote, GuardrailOutcome, Sufficiency, SufficiencyRule};

use tracing::debug;

use crate::confidence::{ConfidenceLabel, ConfidenceSignal};
use crate::evidence::EvidenceBundle;
use crate::retrieval::tokenize;

/// Phrases counted as causal language in evidence text.
pub const CAUSAL_MARKERS: &[&str] = &[
    "because",
    "due to",
    "therefore",
    "caused",
    "causes",
    "as a result",
    "leads to",
    "led to",
    "since",
    "owing to",
    "consequently",
];

/// Gap notes that depend only on the query and the evidence.
pub fn analyze_gaps<C: CoverageStrategy + ?Sized>(
    query: &str,
    bundle: &EvidenceBundle,
    coverage: &C,
) -> Vec<GapNote> {
    let usable = bundle.usable();
    let mut gaps: Vec<GapNote> = coverage
        .uncovered_aspects(query, usable)
        .into_iter()
        .map(|aspect| {
            GapNote::new(
                GapKind::UncoveredAspect,
                format!("No usable evidence mentions '{}'", aspect),
            )
        })
        .collect();

    let groups = bundle.by_document();
    if groups.len() == 1 {
        gaps.push(GapNote::new(
            GapKind::SingleSource,
            format!("Answer is based on a single source only ({})", groups[0].doc_ref),
        ));
    }

    if !usable.is_empty()
        && asks_why(query)
        && !usable.iter().any(|c| has_causal_marker(c.text()))
    {
        gaps.push(GapNote::new(
            GapKind::CausalQuestion,
            "Question asks for an explanation ('why') but the evidence is descriptive rather than causal",
        ));
    }

    debug!(gaps = gaps.len(), "Analyzed evidence gaps");
    gaps
}

/// Applies the sufficiency rules and appends a note naming the rule for non-sufficient
/// verdicts.
pub fn assess(
    bundle: &EvidenceBundle,
    confidence: &ConfidenceSignal,
    mut gaps: Vec<GapNote>,
) -> GuardrailOutcome {
    let rule = if !bundle.has_usable() {
        SufficiencyRule::NoUsableEvidence
    } else if confidence.label == ConfidenceLabel::Low {
        SufficiencyRule::LowConfidence
    } else {
        SufficiencyRule::Supported
    };

    match rule {
        SufficiencyRule::NoUsableEvidence => gaps.push(GapNote::new(
            GapKind::Sufficiency,
            "No evidence passed the relevance threshold",
        )),
        SufficiencyRule::LowConfidence => gaps.push(GapNote::new(
            GapKind::Sufficiency,
            format!(
                "Confidence is low (score {:.2}); evidence only partially supports an answer",
                confidence.score
            ),
        )),
        SufficiencyRule::Supported => {}
    }

    let sufficiency = rule.verdict();
    debug!(
        sufficiency = %sufficiency,
        sufficient = sufficiency.is_sufficient(),
        rule = ?rule,
        gaps = gaps.len(),
        "Applied guardrails"
    );

    GuardrailOutcome {
        sufficiency,
        rule,
        gaps,
    }
}

pub fn asks_why(query: &str) -> bool {
    tokenize(query).iter().any(|t| t == "why")
}

pub fn has_causal_marker(text: &str) -> bool {
    let padded = format!(" {} ", tokenize(text).join(" "));
    CAUSAL_MARKERS
        .iter()
        .any(|marker| padded.contains(&format!(" {} ", marker)))
}
