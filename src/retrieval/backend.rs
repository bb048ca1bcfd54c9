use super::{MemoryVectorIndex, QdrantVectorSearch, RetrievalHit, SearchError, VectorSearch};
use crate::embedding::QueryEncoder;

/// Vector backend chosen at startup.
#[derive(Debug)]
pub enum VectorBackend<E> {
    Memory(MemoryVectorIndex<E>),
    Qdrant(QdrantVectorSearch<E>),
}

impl<E> VectorBackend<E> {
    pub fn name(&self) -> &'static str {
        match self {
            VectorBackend::Memory(_) => "memory",
            VectorBackend::Qdrant(_) => "qdrant",
        }
    }
}

impl<E: QueryEncoder + 'static> VectorSearch for VectorBackend<E> {
    async fn vector_search(&self, query: &str, k: usize) -> Result<Vec<RetrievalHit>, SearchError> {
        match self {
            VectorBackend::Memory(index) => index.vector_search(query, k).await,
            VectorBackend::Qdrant(client) => client.vector_search(query, k).await,
        }
    }
}
