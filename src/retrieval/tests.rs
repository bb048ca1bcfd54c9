use std::collections::HashMap;
use std::sync::Arc;

use qdrant_client::qdrant::Value;

use super::qdrant::hit_from_payload;
use super::*;
use crate::corpus::ChunkRecord;
use crate::embedding::BertEncoder;

fn sample_chunks() -> Vec<ChunkRecord> {
    vec![
        ChunkRecord::new(
            "policy:0",
            "policy.pdf",
            "A refund is issued within 30 days of purchase.",
        ),
        ChunkRecord::new(
            "policy:1",
            "policy.pdf",
            "Shipping is free for orders above 50 euros.",
        ),
        ChunkRecord::new(
            "faq:0",
            "faq.txt",
            "To request a refund, contact support with your order number.",
        ),
        ChunkRecord::new(
            "faq:1",
            "faq.txt",
            "Our office is closed on public holidays.",
        ),
    ]
}

#[test]
fn test_tokenize() {
    assert_eq!(
        tokenize("Hello, World! refund-policy 2024"),
        vec!["hello", "world", "refund", "policy", "2024"]
    );
    assert!(tokenize("  ,.; ").is_empty());
}

#[test]
fn test_signal_display() {
    assert_eq!(Signal::Vector.to_string(), "vector");
    assert_eq!(Signal::Lexical.to_string(), "lexical");
}

#[test]
fn test_bm25_ranks_matching_chunks() {
    let index = Bm25Index::new(sample_chunks());

    let hits = index.search("refund", 10);

    assert_eq!(hits.len(), 2);
    let ids: Vec<&str> = hits.iter().map(|h| h.chunk_id.as_str()).collect();
    assert!(ids.contains(&"policy:0"));
    assert!(ids.contains(&"faq:0"));
    assert!(hits.iter().all(|h| h.raw_score > 0.0));
}

#[test]
fn test_bm25_skips_non_matching_chunks() {
    let index = Bm25Index::new(sample_chunks());

    assert!(index.search("astronomy", 10).is_empty());
    assert!(index.search("", 10).is_empty());
}

#[test]
fn test_bm25_respects_k() {
    let index = Bm25Index::new(sample_chunks());

    let hits = index.search("refund shipping office", 2);

    assert_eq!(hits.len(), 2);
    assert!(hits[0].raw_score >= hits[1].raw_score);
}

#[test]
fn test_bm25_rare_term_scores_higher() {
    let index = Bm25Index::new(sample_chunks());

    assert!(index.idf("holidays") > index.idf("refund"));
    assert_eq!(index.idf("missing"), 0.0);
}

#[test]
fn test_bm25_matches_exact_tokens_only() {
    let index = Bm25Index::new(sample_chunks());

    assert!(index.search("refunds", 10).is_empty());
    assert_eq!(index.idf("refunds"), 0.0);
    assert!(index.idf("refund") > 0.0);
}

#[test]
fn test_bm25_empty_index() {
    let index = Bm25Index::new(Vec::new());

    assert!(index.is_empty());
    assert!(index.search("refund", 5).is_empty());
}

#[tokio::test]
async fn test_bm25_lexical_search_trait() {
    let index = Bm25Index::new(sample_chunks());

    let hits = index.lexical_search("shipping orders", 5).await.unwrap();

    assert_eq!(hits[0].chunk_id, "policy:1");
    assert_eq!(hits[0].doc_ref, "policy.pdf");
}

#[test]
fn test_cosine_similarity_identical() {
    let v = vec![0.3, 0.4, 0.5];
    assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
}

#[test]
fn test_cosine_similarity_orthogonal() {
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
}

#[test]
fn test_cosine_similarity_degenerate() {
    assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
    assert_eq!(cosine_similarity(&[], &[]), 0.0);
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
}

#[tokio::test]
async fn test_memory_index_finds_shared_words() {
    let encoder = Arc::new(BertEncoder::stub().unwrap());
    let index = MemoryVectorIndex::build(encoder, sample_chunks()).unwrap();

    assert_eq!(index.len(), 4);

    let hits = index
        .vector_search("public holidays office", 2)
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].chunk_id, "faq:1");
    assert!(hits[0].raw_score >= hits[1].raw_score);
}

#[tokio::test]
async fn test_memory_index_zero_k() {
    let encoder = Arc::new(BertEncoder::stub().unwrap());
    let index = MemoryVectorIndex::build(encoder, sample_chunks()).unwrap();

    assert!(index.vector_search("refund", 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_vector_backend_dispatches_to_memory() {
    let encoder = Arc::new(BertEncoder::stub().unwrap());
    let backend = VectorBackend::Memory(MemoryVectorIndex::build(encoder, sample_chunks()).unwrap());

    assert_eq!(backend.name(), "memory");
    let hits = backend.vector_search("refund", 4).await.unwrap();
    assert_eq!(hits.len(), 4);
}

#[test]
fn test_qdrant_client_builds_lazily() {
    let encoder = Arc::new(BertEncoder::stub().unwrap());
    let search = QdrantVectorSearch::new("http://localhost:6334", "chunks", encoder).unwrap();

    assert_eq!(search.url(), "http://localhost:6334");
    assert_eq!(search.collection(), "chunks");
}

#[test]
fn test_hit_from_payload() {
    let mut payload: HashMap<String, Value> = HashMap::new();
    payload.insert("chunk_id".to_string(), "faq:0".to_string().into());
    payload.insert("text".to_string(), "contact support".to_string().into());
    payload.insert("doc_ref".to_string(), "faq.txt".to_string().into());

    let hit = hit_from_payload(&payload, 0.82).unwrap();

    assert_eq!(hit, RetrievalHit::new("faq:0", "contact support", "faq.txt", 0.82));
}

#[test]
fn test_hit_from_payload_missing_field() {
    let mut payload: HashMap<String, Value> = HashMap::new();
    payload.insert("chunk_id".to_string(), "faq:0".to_string().into());
    payload.insert("text".to_string(), "contact support".to_string().into());

    assert!(hit_from_payload(&payload, 0.5).is_none());
}

#[tokio::test]
async fn test_static_search_truncates() {
    let search = StaticSearch::new(vec![
        RetrievalHit::new("a", "alpha", "doc", 0.9),
        RetrievalHit::new("b", "beta", "doc", 0.5),
    ]);

    let hits = search.vector_search("anything", 1).await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].chunk_id, "a");
    assert_eq!(search.calls(), 1);
}

#[tokio::test]
async fn test_failing_search_reports_unavailable() {
    let search = FailingSearch::new("index offline");

    let err = search.lexical_search("q", 5).await.unwrap_err();

    assert!(matches!(err, SearchError::Unavailable { .. }));
    assert!(err.to_string().contains("index offline"));
}
