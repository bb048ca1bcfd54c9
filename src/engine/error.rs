use thiserror::Error;

use crate::config::ConfigError;

/// Reasons a query produced no trace at all.
///
/// Degraded backends never surface here; they are recorded as trace notes instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("query exceeded its {timeout_ms} ms deadline")]
    Timeout { timeout_ms: u64 },

    #[error("query was cancelled")]
    Cancelled,

    #[error("query is empty")]
    EmptyQuery,

    #[error("invalid engine configuration: {0}")]
    Config(#[from] ConfigError),
}
