//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VERDICT_*` environment variables.
//!
//! - [`Config`] locates the corpus and the model/backends the binary wires together.
//! - [`EngineConfig`] holds the per-query pipeline knobs (pool sizes, weights, thresholds).

pub mod engine;
pub mod error;


pub use engine::{ConfidenceThresholds, EngineConfig, FusionWeights};
pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::DEFAULT_QDRANT_COLLECTION;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON-lines file of pre-chunked records. Default: `./data/chunks.jsonl`.
    pub corpus_path: PathBuf,

    /// Qdrant endpoint URL. When unset, vector search runs in memory.
    pub qdrant_url: Option<String>,

    /// Qdrant collection holding chunk vectors. Default: `verdict_chunks`.
    pub qdrant_collection: String,

    /// Sentence encoder model directory (BERT + tokenizer).
    pub encoder_path: Option<PathBuf>,

    /// Cross-encoder model directory (BERT + tokenizer).
    pub reranker_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("./data/chunks.jsonl"),
            qdrant_url: None,
            qdrant_collection: DEFAULT_QDRANT_COLLECTION.to_string(),
            encoder_path: None,
            reranker_path: None,
        }
    }
}

impl Config {
    const ENV_CORPUS_PATH: &'static str = "VERDICT_CORPUS_PATH";
    const ENV_QDRANT_URL: &'static str = "VERDICT_QDRANT_URL";
    const ENV_QDRANT_COLLECTION: &'static str = "VERDICT_QDRANT_COLLECTION";
    const ENV_ENCODER_PATH: &'static str = "VERDICT_ENCODER_PATH";
    const ENV_RERANKER_PATH: &'static str = "VERDICT_RERANKER_PATH";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            corpus_path: Self::parse_path_from_env(Self::ENV_CORPUS_PATH, defaults.corpus_path),
            qdrant_url: Self::parse_optional_string_from_env(Self::ENV_QDRANT_URL),
            qdrant_collection: Self::parse_optional_string_from_env(Self::ENV_QDRANT_COLLECTION)
                .unwrap_or(defaults.qdrant_collection),
            encoder_path: Self::parse_optional_path_from_env(Self::ENV_ENCODER_PATH),
            reranker_path: Self::parse_optional_path_from_env(Self::ENV_RERANKER_PATH),
        }
    }

    /// Validates paths (does not create anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.corpus_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.corpus_path.clone(),
            });
        }
        if !self.corpus_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.corpus_path.clone(),
            });
        }

        for path in [&self.encoder_path, &self.reranker_path].into_iter().flatten() {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        Self::parse_optional_path_from_env(var_name).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::parse_optional_string_from_env(var_name).map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
