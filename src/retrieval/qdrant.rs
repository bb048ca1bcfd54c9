use std::collections::HashMap;
use std::sync::Arc;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{ScoredPoint, SearchPointsBuilder, Value};
use tracing::{debug, warn};

use super::{RetrievalHit, SearchError, VectorSearch};
use crate::embedding::QueryEncoder;

const BACKEND: &str = "qdrant";

/// Payload keys written by the ingestion side.
pub const PAYLOAD_CHUNK_ID: &str = "chunk_id";
pub const PAYLOAD_TEXT: &str = "text";
pub const PAYLOAD_DOC_REF: &str = "doc_ref";

/// Vector search against a Qdrant collection.
///
/// Points must carry `chunk_id`, `text` and `doc_ref` payload fields; points missing any
/// of them are skipped. Scores are whatever the collection's distance yields (cosine
/// similarity for the default setup).
#[derive(Clone)]
pub struct QdrantVectorSearch<E> {
    client: Qdrant,
    url: String,
    collection: String,
    encoder: Arc<E>,
}

impl<E> std::fmt::Debug for QdrantVectorSearch<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QdrantVectorSearch")
            .field("url", &self.url)
            .field("collection", &self.collection)
            .finish()
    }
}

impl<E: QueryEncoder + 'static> QdrantVectorSearch<E> {
    pub fn new(url: &str, collection: &str, encoder: Arc<E>) -> Result<Self, SearchError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| SearchError::Unavailable {
                backend: BACKEND,
                reason: format!("failed to connect to {}: {}", url, e),
            })?;

        Ok(Self {
            client,
            url: url.to_string(),
            collection: collection.to_string(),
            encoder,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub async fn health_check(&self) -> Result<(), SearchError> {
        self.client
            .health_check()
            .await
            .map_err(|e| SearchError::Unavailable {
                backend: BACKEND,
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

impl<E: QueryEncoder + 'static> VectorSearch for QdrantVectorSearch<E> {
    async fn vector_search(&self, query: &str, k: usize) -> Result<Vec<RetrievalHit>, SearchError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let encoder = Arc::clone(&self.encoder);
        let owned_query = query.to_string();
        let embedding = tokio::task::spawn_blocking(move || encoder.encode(&owned_query))
            .await
            .map_err(|e| SearchError::Unavailable {
                backend: BACKEND,
                reason: format!("encoder task failed: {}", e),
            })??;

        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, embedding, k as u64).with_payload(true),
            )
            .await
            .map_err(|e| SearchError::SearchFailed {
                backend: BACKEND,
                message: e.to_string(),
            })?;

        let total = response.result.len();
        let hits: Vec<RetrievalHit> = response
            .result
            .into_iter()
            .filter_map(hit_from_scored_point)
            .collect();

        if hits.len() < total {
            warn!(
                collection = %self.collection,
                skipped = total - hits.len(),
                "Skipped Qdrant points without chunk payload"
            );
        }
        debug!(hits = hits.len(), k = k, "Qdrant search complete");

        Ok(hits)
    }
}

fn hit_from_scored_point(point: ScoredPoint) -> Option<RetrievalHit> {
    hit_from_payload(&point.payload, point.score)
}

pub(crate) fn hit_from_payload(payload: &HashMap<String, Value>, score: f32) -> Option<RetrievalHit> {
    let field = |key: &str| {
        payload
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty())
    };

    Some(RetrievalHit::new(
        field(PAYLOAD_CHUNK_ID)?,
        field(PAYLOAD_TEXT)?,
        field(PAYLOAD_DOC_REF)?,
        score,
    ))
}
