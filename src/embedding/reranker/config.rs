use std::path::PathBuf;

pub const MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

#[derive(Debug, Clone)]
pub struct RerankerConfig {
    pub model_path: Option<PathBuf>,

    /// Squash raw logits through a sigmoid so scores land in `[0, 1]`.
    pub apply_sigmoid: bool,

    pub max_seq_len: usize,
}

impl Default for RerankerConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            apply_sigmoid: true,
            max_seq_len: MAX_SEQ_LEN,
        }
    }
}

impl RerankerConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn with_raw_logits(mut self) -> Self {
        self.apply_sigmoid = false;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_seq_len < 8 {
            return Err(format!(
                "max_seq_len must be at least 8, got {}",
                self.max_seq_len
            ));
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }

        Ok(())
    }

    pub fn from_env() -> Self {
        let model_path = std::env::var("VERDICT_RERANKER_PATH")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let apply_sigmoid = std::env::var("VERDICT_RERANKER_SIGMOID")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        Self {
            model_path,
            apply_sigmoid,
            ..Default::default()
        }
    }
}
