//! Heuristic confidence over the usable evidence distribution.
//!
//! ```text
//! score = 0.6 * top + 0.15 * (top - median) + 0.25 * corroboration
//! corroboration = min(distinct_sources_in_window - 1, 2) / 2
//! ```
//!
//! Relevance scores are clamped to `[0, 1]` first. Evidence drawn from a single document
//! never rates `high`.


use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ConfidenceThresholds;
use crate::evidence::EvidenceBundle;

pub const TOP_WEIGHT: f32 = 0.6;
pub const SEPARATION_WEIGHT: f32 = 0.15;
pub const CORROBORATION_WEIGHT: f32 = 0.25;

/// Distinct sources beyond the first that still add corroboration.
const MAX_EXTRA_SOURCES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLabel {
    Low,
    Medium,
    High,
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceLabel::High => write!(f, "high"),
            ConfidenceLabel::Medium => write!(f, "medium"),
            ConfidenceLabel::Low => write!(f, "low"),
        }
    }
}

impl ConfidenceLabel {
    pub fn from_score(score: f32, thresholds: ConfidenceThresholds) -> Self {
        if score >= thresholds.high {
            ConfidenceLabel::High
        } else if score >= thresholds.medium {
            ConfidenceLabel::Medium
        } else {
            ConfidenceLabel::Low
        }
    }
}

/// Confidence score, label and the statistics they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSignal {
    pub score: f32,
    pub label: ConfidenceLabel,
    pub top: f32,
    pub median: f32,
    pub separation: f32,
    /// Distinct documents among the leading usable items.
    pub distinct_sources: usize,
    pub usable_count: usize,
    /// The label would have been `high` but all usable evidence is from one document.
    pub single_source_capped: bool,
}

impl ConfidenceSignal {
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            label: ConfidenceLabel::Low,
            top: 0.0,
            median: 0.0,
            separation: 0.0,
            distinct_sources: 0,
            usable_count: 0,
            single_source_capped: false,
        }
    }
}

pub fn estimate_confidence(
    bundle: &EvidenceBundle,
    thresholds: ConfidenceThresholds,
    corroboration_window: usize,
) -> ConfidenceSignal {
    let usable = bundle.usable();
    if usable.is_empty() {
        debug!("No usable evidence, confidence is low");
        return ConfidenceSignal::empty();
    }

    let scores: Vec<f32> = usable.iter().map(|c| c.relevance.clamp(0.0, 1.0)).collect();
    let top = scores[0];
    let median = median(&scores);
    let separation = (top - median).max(0.0);

    let mut window_docs: Vec<&str> = usable
        .iter()
        .take(corroboration_window.max(1))
        .map(|c| c.doc_ref())
        .collect();
    window_docs.sort_unstable();
    window_docs.dedup();
    let distinct_sources = window_docs.len();

    let extra = distinct_sources.saturating_sub(1).min(MAX_EXTRA_SOURCES);
    let corroboration = extra as f32 / MAX_EXTRA_SOURCES as f32;

    let score = (TOP_WEIGHT * top
        + SEPARATION_WEIGHT * separation
        + CORROBORATION_WEIGHT * corroboration)
        .clamp(0.0, 1.0);

    let mut label = ConfidenceLabel::from_score(score, thresholds);
    let single_source = bundle.distinct_sources() == 1;
    let single_source_capped = single_source && label == ConfidenceLabel::High;
    if single_source_capped {
        label = ConfidenceLabel::Medium;
    }

    debug!(
        score = score,
        label = %label,
        top = top,
        median = median,
        distinct_sources = distinct_sources,
        single_source_capped = single_source_capped,
        "Estimated confidence"
    );

    ConfidenceSignal {
        score,
        label,
        top,
        median,
        separation,
        distinct_sources,
        usable_count: usable.len(),
        single_source_capped,
    }
}

fn median(scores: &[f32]) -> f32 {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
