use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::types::NormalizedHit;
use crate::retrieval::{RetrievalHit, Signal};

/// How raw scores are mapped onto `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// `(x - min) / (max - min)` within the signal's result list.
    #[default]
    MinMax,
    /// `(n - rank) / n`; equal raw scores share a rank.
    Rank,
}

impl fmt::Display for NormalizationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationPolicy::MinMax => write!(f, "minmax"),
            NormalizationPolicy::Rank => write!(f, "rank"),
        }
    }
}

impl FromStr for NormalizationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minmax" | "min_max" | "min-max" => Ok(NormalizationPolicy::MinMax),
            "rank" => Ok(NormalizationPolicy::Rank),
            other => Err(format!(
                "unknown normalization policy '{}' (expected minmax or rank)",
                other
            )),
        }
    }
}

/// Whether the vector backend reports similarities or distances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorScoreKind {
    /// Higher is more relevant (cosine similarity, dot product).
    #[default]
    Similarity,
    /// Lower is more relevant (L2, cosine distance).
    Distance,
}

impl VectorScoreKind {
    pub fn direction(self) -> ScoreDirection {
        match self {
            VectorScoreKind::Similarity => ScoreDirection::HigherIsBetter,
            VectorScoreKind::Distance => ScoreDirection::LowerIsBetter,
        }
    }
}

impl fmt::Display for VectorScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorScoreKind::Similarity => write!(f, "similarity"),
            VectorScoreKind::Distance => write!(f, "distance"),
        }
    }
}

impl FromStr for VectorScoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "similarity" => Ok(VectorScoreKind::Similarity),
            "distance" => Ok(VectorScoreKind::Distance),
            other => Err(format!(
                "unknown vector score kind '{}' (expected similarity or distance)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreDirection {
    HigherIsBetter,
    LowerIsBetter,
}

impl ScoreDirection {
    fn compare(self, a: f32, b: f32) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            ScoreDirection::HigherIsBetter => ord.reverse(),
            ScoreDirection::LowerIsBetter => ord,
        }
    }
}

/// Rescales one signal's hits onto `[0, 1]`, best first.
///
/// Non-finite scores are dropped and a repeated chunk id keeps its best-ranked
/// occurrence. One remaining hit, or hits that all share a raw score, normalize to `1.0`.
pub fn normalize(
    signal: Signal,
    hits: Vec<RetrievalHit>,
    policy: NormalizationPolicy,
    direction: ScoreDirection,
) -> Vec<NormalizedHit> {
    let received = hits.len();
    let mut hits: Vec<RetrievalHit> = hits
        .into_iter()
        .filter(|hit| {
            let finite = hit.raw_score.is_finite();
            if !finite {
                warn!(
                    signal = %signal,
                    chunk_id = %hit.chunk_id,
                    raw_score = hit.raw_score,
                    "Dropping hit with non-finite score"
                );
            }
            finite
        })
        .collect();

    hits.sort_by(|a, b| {
        direction
            .compare(a.raw_score, b.raw_score)
            .then_with(|| a.chunk_id.cmp(&b.chunk_id))
    });

    let mut seen = HashSet::new();
    hits.retain(|hit| seen.insert(hit.chunk_id.clone()));

    let scores = match policy {
        NormalizationPolicy::MinMax => min_max_scores(&hits, direction),
        NormalizationPolicy::Rank => rank_scores(&hits),
    };

    debug!(
        signal = %signal,
        policy = %policy,
        received = received,
        kept = hits.len(),
        "Normalized retrieval scores"
    );

    hits.into_iter()
        .zip(scores)
        .map(|(hit, score)| NormalizedHit::from_hit(hit, score))
        .collect()
}

fn min_max_scores(hits: &[RetrievalHit], direction: ScoreDirection) -> Vec<f32> {
    // f64 so the span of two extreme finite f32 scores cannot overflow.
    let (min, max) = hits
        .iter()
        .map(|hit| hit.raw_score as f64)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), score| {
            (lo.min(score), hi.max(score))
        });
    let range = max - min;

    hits.iter()
        .map(|hit| {
            if hits.len() <= 1 || range <= 0.0 {
                return 1.0;
            }
            let raw = hit.raw_score as f64;
            let scaled = match direction {
                ScoreDirection::HigherIsBetter => (raw - min) / range,
                ScoreDirection::LowerIsBetter => (max - raw) / range,
            };
            scaled.clamp(0.0, 1.0) as f32
        })
        .collect()
}

/// Expects `hits` sorted best first.
fn rank_scores(hits: &[RetrievalHit]) -> Vec<f32> {
    let n = hits.len() as f32;
    let mut scores = Vec::with_capacity(hits.len());
    let mut rank = 0usize;

    for (idx, hit) in hits.iter().enumerate() {
        if idx > 0 && hit.raw_score != hits[idx - 1].raw_score {
            rank = idx;
        }
        scores.push((n - rank as f32) / n);
    }

    scores
}
