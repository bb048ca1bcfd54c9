use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::constants::{
    DEFAULT_CONFIDENCE_HIGH, DEFAULT_CONFIDENCE_MEDIUM, DEFAULT_CORROBORATION_WINDOW,
    DEFAULT_EVIDENCE_CAP, DEFAULT_QUERY_TIMEOUT_MS, DEFAULT_RELEVANCE_THRESHOLD,
    DEFAULT_RERANK_BATCH_SIZE, DEFAULT_RETRIEVAL_K,
};
use crate::fusion::{NormalizationPolicy, VectorScoreKind};

/// Relative weight of each retrieval signal in the fused score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionWeights {
    pub vector: f32,
    pub lexical: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            vector: 0.5,
            lexical: 0.5,
        }
    }
}

impl FusionWeights {
    pub fn new(vector: f32, lexical: f32) -> Self {
        Self { vector, lexical }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidFusionWeights {
            vector: self.vector,
            lexical: self.lexical,
            reason: reason.to_string(),
        };

        if !self.vector.is_finite() || !self.lexical.is_finite() {
            return Err(invalid("weights must be finite"));
        }
        if self.vector < 0.0 || self.lexical < 0.0 {
            return Err(invalid("weights must be non-negative"));
        }
        if self.vector == 0.0 && self.lexical == 0.0 {
            return Err(invalid("at least one weight must be positive"));
        }
        Ok(())
    }
}

/// Fixed cut-offs mapping the continuous confidence score to a label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceThresholds {
    /// Scores at or above this are `high`.
    pub high: f32,
    /// Scores at or above this (and below `high`) are `medium`.
    pub medium: f32,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_CONFIDENCE_HIGH,
            medium: DEFAULT_CONFIDENCE_MEDIUM,
        }
    }
}

impl ConfidenceThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_range("confidence_thresholds.high", self.high)?;
        check_unit_range("confidence_thresholds.medium", self.medium)?;
        if self.medium > self.high {
            return Err(ConfigError::ThresholdOrder {
                medium: self.medium,
                high: self.high,
            });
        }
        Ok(())
    }
}

/// Per-query pipeline configuration.
///
/// Use [`EngineConfig::from_env`] to read `VERDICT_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Candidates requested from vector search. Default: `50`.
    pub vector_k: usize,

    /// Candidates requested from lexical search. Default: `50`.
    pub lexical_k: usize,

    pub fusion_weights: FusionWeights,

    /// Maximum usable evidence items (`N`). Default: `10`.
    pub evidence_cap: usize,

    /// Minimum reranked relevance for usable evidence (`T`). Default: `0.10`.
    pub relevance_threshold: f32,

    pub confidence_thresholds: ConfidenceThresholds,

    pub normalization: NormalizationPolicy,

    /// How raw vector scores should be read. Default: similarity.
    pub vector_score_kind: VectorScoreKind,

    /// Leading usable items inspected for distinct sources. Default: `3`.
    pub corroboration_window: usize,

    /// Passages per cross-encoder batch. Default: `16`.
    pub rerank_batch_size: usize,

    /// Deadline for the whole query. Default: 30 s.
    pub query_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vector_k: DEFAULT_RETRIEVAL_K,
            lexical_k: DEFAULT_RETRIEVAL_K,
            fusion_weights: FusionWeights::default(),
            evidence_cap: DEFAULT_EVIDENCE_CAP,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
            confidence_thresholds: ConfidenceThresholds::default(),
            normalization: NormalizationPolicy::default(),
            vector_score_kind: VectorScoreKind::default(),
            corroboration_window: DEFAULT_CORROBORATION_WINDOW,
            rerank_batch_size: DEFAULT_RERANK_BATCH_SIZE,
            query_timeout: Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS),
        }
    }
}

impl EngineConfig {
    const ENV_VECTOR_K: &'static str = "VERDICT_VECTOR_K";
    const ENV_LEXICAL_K: &'static str = "VERDICT_LEXICAL_K";
    const ENV_VECTOR_WEIGHT: &'static str = "VERDICT_VECTOR_WEIGHT";
    const ENV_LEXICAL_WEIGHT: &'static str = "VERDICT_LEXICAL_WEIGHT";
    const ENV_EVIDENCE_CAP: &'static str = "VERDICT_EVIDENCE_CAP";
    const ENV_RELEVANCE_THRESHOLD: &'static str = "VERDICT_RELEVANCE_THRESHOLD";
    const ENV_CONFIDENCE_HIGH: &'static str = "VERDICT_CONFIDENCE_HIGH";
    const ENV_CONFIDENCE_MEDIUM: &'static str = "VERDICT_CONFIDENCE_MEDIUM";
    const ENV_NORMALIZATION: &'static str = "VERDICT_NORMALIZATION";
    const ENV_VECTOR_SCORE_KIND: &'static str = "VERDICT_VECTOR_SCORE_KIND";
    const ENV_RERANK_BATCH_SIZE: &'static str = "VERDICT_RERANK_BATCH_SIZE";
    const ENV_QUERY_TIMEOUT_MS: &'static str = "VERDICT_QUERY_TIMEOUT_MS";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// Unparseable values are reported rather than silently replaced.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let vector_k = parse_from_env(Self::ENV_VECTOR_K)?.unwrap_or(defaults.vector_k);
        let lexical_k = parse_from_env(Self::ENV_LEXICAL_K)?.unwrap_or(defaults.lexical_k);
        let fusion_weights = FusionWeights {
            vector: parse_from_env(Self::ENV_VECTOR_WEIGHT)?
                .unwrap_or(defaults.fusion_weights.vector),
            lexical: parse_from_env(Self::ENV_LEXICAL_WEIGHT)?
                .unwrap_or(defaults.fusion_weights.lexical),
        };
        let evidence_cap =
            parse_from_env(Self::ENV_EVIDENCE_CAP)?.unwrap_or(defaults.evidence_cap);
        let relevance_threshold = parse_from_env(Self::ENV_RELEVANCE_THRESHOLD)?
            .unwrap_or(defaults.relevance_threshold);
        let confidence_thresholds = ConfidenceThresholds {
            high: parse_from_env(Self::ENV_CONFIDENCE_HIGH)?
                .unwrap_or(defaults.confidence_thresholds.high),
            medium: parse_from_env(Self::ENV_CONFIDENCE_MEDIUM)?
                .unwrap_or(defaults.confidence_thresholds.medium),
        };
        let normalization =
            parse_from_env(Self::ENV_NORMALIZATION)?.unwrap_or(defaults.normalization);
        let vector_score_kind =
            parse_from_env(Self::ENV_VECTOR_SCORE_KIND)?.unwrap_or(defaults.vector_score_kind);
        let rerank_batch_size =
            parse_from_env(Self::ENV_RERANK_BATCH_SIZE)?.unwrap_or(defaults.rerank_batch_size);
        let query_timeout = parse_from_env::<u64>(Self::ENV_QUERY_TIMEOUT_MS)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.query_timeout);

        Ok(Self {
            vector_k,
            lexical_k,
            fusion_weights,
            evidence_cap,
            relevance_threshold,
            confidence_thresholds,
            normalization,
            vector_score_kind,
            corroboration_window: defaults.corroboration_window,
            rerank_batch_size,
            query_timeout,
        })
    }

    /// Checks counts, unit-range thresholds and weight sanity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_zero("vector_k", self.vector_k)?;
        check_non_zero("lexical_k", self.lexical_k)?;
        check_non_zero("evidence_cap", self.evidence_cap)?;
        check_non_zero("corroboration_window", self.corroboration_window)?;
        check_non_zero("rerank_batch_size", self.rerank_batch_size)?;
        check_unit_range("relevance_threshold", self.relevance_threshold)?;
        self.fusion_weights.validate()?;
        self.confidence_thresholds.validate()?;

        if self.query_timeout.is_zero() {
            return Err(ConfigError::ZeroCount {
                name: "query_timeout",
            });
        }

        Ok(())
    }

    pub fn with_evidence_cap(mut self, cap: usize) -> Self {
        self.evidence_cap = cap;
        self
    }

    pub fn with_relevance_threshold(mut self, threshold: f32) -> Self {
        self.relevance_threshold = threshold;
        self
    }

    pub fn with_fusion_weights(mut self, vector: f32, lexical: f32) -> Self {
        self.fusion_weights = FusionWeights::new(vector, lexical);
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }
}

fn check_non_zero(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::ZeroCount { name });
    }
    Ok(())
}

fn check_unit_range(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfUnitRange { name, value });
    }
    Ok(())
}

fn parse_from_env<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => {
            let value = raw.trim();
            if value.is_empty() {
                return Ok(None);
            }
            value
                .parse()
                .map(Some)
                .map_err(|e: T::Err| ConfigError::InvalidValue {
                    name,
                    value: value.to_string(),
                    reason: e.to_string(),
                })
        }
        Err(_) => Ok(None),
    }
}
