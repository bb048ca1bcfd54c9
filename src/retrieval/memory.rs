use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, info};

use super::{RetrievalHit, SearchError, VectorSearch};
use crate::corpus::ChunkRecord;
use crate::embedding::{EmbeddingError, QueryEncoder};

const BACKEND: &str = "memory-vector";

struct IndexedChunk {
    record: ChunkRecord,
    embedding: Vec<f32>,
}

/// Brute-force cosine search over chunk embeddings held in memory.
pub struct MemoryVectorIndex<E> {
    encoder: Arc<E>,
    entries: Vec<IndexedChunk>,
}

impl<E> std::fmt::Debug for MemoryVectorIndex<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryVectorIndex")
            .field("chunks", &self.entries.len())
            .finish()
    }
}

impl<E: QueryEncoder + 'static> MemoryVectorIndex<E> {
    /// Embeds every chunk up front.
    pub fn build(encoder: Arc<E>, chunks: Vec<ChunkRecord>) -> Result<Self, EmbeddingError> {
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = encoder.encode_batch(&texts)?;

        let expected = encoder.dimension();
        let mut entries = Vec::with_capacity(chunks.len());
        for (record, embedding) in chunks.into_iter().zip(embeddings) {
            if embedding.len() != expected {
                return Err(EmbeddingError::DimensionMismatch {
                    expected,
                    actual: embedding.len(),
                });
            }
            entries.push(IndexedChunk { record, embedding });
        }

        info!(
            chunks = entries.len(),
            dimension = expected,
            "Built in-memory vector index"
        );

        Ok(Self { encoder, entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ranks chunks by cosine similarity to an already-encoded query.
    pub fn search_embedding(&self, query: &[f32], k: usize) -> Vec<RetrievalHit> {
        let mut scored: Vec<(&IndexedChunk, f32)> = self
            .entries
            .iter()
            .map(|entry| (entry, cosine_similarity(query, &entry.embedding)))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.record.id.cmp(&b.0.record.id))
        });
        scored.truncate(k);

        scored
            .into_iter()
            .map(|(entry, score)| {
                RetrievalHit::new(
                    &entry.record.id,
                    &entry.record.text,
                    &entry.record.doc_ref,
                    score,
                )
            })
            .collect()
    }
}

impl<E: QueryEncoder + 'static> VectorSearch for MemoryVectorIndex<E> {
    async fn vector_search(&self, query: &str, k: usize) -> Result<Vec<RetrievalHit>, SearchError> {
        if k == 0 || self.entries.is_empty() {
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

        let hits = self.search_embedding(&embedding, k);
        debug!(hits = hits.len(), k = k, "Vector search complete");
        Ok(hits)
    }
}

/// Cosine similarity; `0.0` for mismatched lengths or zero vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
