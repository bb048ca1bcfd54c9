//! Integration tests for corpus loading and identifiers.

mod common;

use std::collections::HashSet;

use common::fixtures::{sample_chunks, stub_engine, write_sample_corpus};
use verdict::{CorpusError, EngineConfig, derive_chunk_id, load_corpus, query_fingerprint};

#[test]
fn test_sample_corpus_loads_with_unique_ids() {
    let chunks = sample_chunks();

    assert_eq!(chunks.len(), 6);
    let ids: HashSet<&str> = chunks.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids.len(), chunks.len());
}

#[test]
fn test_missing_id_is_derived_from_document_position() {
    let chunks = sample_chunks();
    let last = chunks.last().unwrap();

    assert_eq!(
        last.id,
        derive_chunk_id("office_hours.md", 1, &last.text),
        "second office_hours.md record should take position 1"
    );
}

#[test]
fn test_missing_corpus_file_reports_path() {
    let (dir, _path) = write_sample_corpus();
    let missing = dir.path().join("nope.jsonl");

    let err = load_corpus(&missing).unwrap_err();
    assert!(matches!(err, CorpusError::Io { .. }));
    assert!(err.to_string().contains("nope.jsonl"));
}

#[tokio::test]
async fn test_trace_carries_query_fingerprint() {
    let engine = stub_engine();
    let query = "office opening hours";

    let trace = engine
        .build_decision_trace(query, &EngineConfig::default())
        .await
        .unwrap();

    assert_eq!(trace.query_fingerprint(), query_fingerprint(query));
}
