use std::fmt;

use serde::{Deserialize, Serialize};

/// Final verdict on whether the evidence can support an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sufficiency {
    Sufficient,
    Partial,
    Insufficient,
}

impl Sufficiency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sufficiency::Sufficient => "SUFFICIENT",
            Sufficiency::Partial => "PARTIAL",
            Sufficiency::Insufficient => "INSUFFICIENT",
        }
    }

    pub fn is_sufficient(&self) -> bool {
        matches!(self, Sufficiency::Sufficient)
    }
}

impl fmt::Display for Sufficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which sufficiency rule decided the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SufficiencyRule {
    NoUsableEvidence,
    LowConfidence,
    Supported,
}

impl SufficiencyRule {
    pub fn verdict(&self) -> Sufficiency {
        match self {
            SufficiencyRule::NoUsableEvidence => Sufficiency::Insufficient,
            SufficiencyRule::LowConfidence => Sufficiency::Partial,
            SufficiencyRule::Supported => Sufficiency::Sufficient,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    /// A query aspect no usable evidence mentions.
    UncoveredAspect,
    /// All usable evidence comes from one document.
    SingleSource,
    /// "Why" question without causal language in the evidence.
    CausalQuestion,
    /// The rule behind a non-sufficient verdict.
    Sufficiency,
}

impl fmt::Display for GapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GapKind::UncoveredAspect => "uncovered aspect",
            GapKind::SingleSource => "single source",
            GapKind::CausalQuestion => "causal question",
            GapKind::Sufficiency => "sufficiency",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapNote {
    pub kind: GapKind,
    pub detail: String,
}

impl GapNote {
    pub fn new(kind: GapKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for GapNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.detail)
    }
}

/// Verdict plus every gap note for the trace.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardrailOutcome {
    pub sufficiency: Sufficiency,
    pub rule: SufficiencyRule,
    pub gaps: Vec<GapNote>,
}
