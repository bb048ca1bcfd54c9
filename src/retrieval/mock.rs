use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{LexicalSearch, RetrievalHit, SearchError, VectorSearch};

/// Returns a fixed hit list (truncated to `k`) for any query.
#[derive(Debug, Default)]
pub struct StaticSearch {
    hits: Vec<RetrievalHit>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StaticSearch {
    pub fn new(hits: Vec<RetrievalHit>) -> Self {
        Self {
            hits,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Sleeps before answering; used to exercise deadlines.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond(&self, k: usize) -> Result<Vec<RetrievalHit>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.hits.iter().take(k).cloned().collect())
    }
}

impl VectorSearch for StaticSearch {
    async fn vector_search(&self, _query: &str, k: usize) -> Result<Vec<RetrievalHit>, SearchError> {
        self.respond(k).await
    }
}

impl LexicalSearch for StaticSearch {
    async fn lexical_search(&self, _query: &str, k: usize) -> Result<Vec<RetrievalHit>, SearchError> {
        self.respond(k).await
    }
}

/// Always reports the backend as unavailable.
#[derive(Debug, Clone)]
pub struct FailingSearch {
    reason: String,
}

impl FailingSearch {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl VectorSearch for FailingSearch {
    async fn vector_search(&self, _query: &str, _k: usize) -> Result<Vec<RetrievalHit>, SearchError> {
        Err(SearchError::Unavailable {
            backend: "mock-vector",
            reason: self.reason.clone(),
        })
    }
}

impl LexicalSearch for FailingSearch {
    async fn lexical_search(&self, _query: &str, _k: usize) -> Result<Vec<RetrievalHit>, SearchError> {
        Err(SearchError::Unavailable {
            backend: "mock-lexical",
            reason: self.reason.clone(),
        })
    }
}
