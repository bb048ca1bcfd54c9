//! Test fixtures for integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use verdict::corpus::{ChunkRecord, load_corpus};
use verdict::embedding::BertEncoder;
use verdict::engine::DecisionEngine;
use verdict::rerank::CrossEncoderScorer;
use verdict::retrieval::{Bm25Index, MemoryVectorIndex, RetrievalHit};

/// A small two-topic corpus: refunds (two documents) and office hours (one document).
pub const SAMPLE_CORPUS: &str = r#"{"id": "policy:0", "doc_ref": "refund_policy.pdf", "text": "Customers may request a refund within 30 days of purchase. Refunds are issued to the original payment method."}
{"id": "policy:1", "doc_ref": "refund_policy.pdf", "text": "Digital downloads are not eligible for a refund once the download has started."}
{"id": "faq:0", "doc_ref": "faq.txt", "text": "To request a refund, contact support with your order number and the reason for the return."}
{"id": "faq:1", "doc_ref": "faq.txt", "text": "Shipping to international addresses takes between seven and fourteen business days."}
{"id": "office:0", "doc_ref": "office_hours.md", "text": "The support office is open Monday to Friday from nine to five and closed on public holidays."}
{"doc_ref": "office_hours.md", "text": "Holiday closures are announced on the status page two weeks in advance."}
"#;

/// Writes [`SAMPLE_CORPUS`] to a temp file; keep the [`TempDir`] alive while in use.
pub fn write_sample_corpus() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("chunks.jsonl");
    std::fs::write(&path, SAMPLE_CORPUS).expect("write corpus");
    (dir, path)
}

pub fn sample_chunks() -> Vec<ChunkRecord> {
    let (_dir, path) = write_sample_corpus();
    load_corpus(&path).expect("load sample corpus")
}

pub type StubEngine = DecisionEngine<MemoryVectorIndex<BertEncoder>, Bm25Index, CrossEncoderScorer>;

/// Engine over the sample corpus with stub encoder and stub cross-encoder.
pub fn stub_engine() -> StubEngine {
    let chunks = sample_chunks();
    let encoder = Arc::new(BertEncoder::stub().expect("stub encoder"));
    let vector = MemoryVectorIndex::build(encoder, chunks.clone()).expect("vector index");
    let lexical = Bm25Index::new(chunks);
    let scorer = CrossEncoderScorer::stub().expect("stub reranker");
    DecisionEngine::new(vector, lexical, scorer)
}

#[derive(Default)]
pub struct HitBuilder {
    id: Option<String>,
    doc_ref: Option<String>,
    text: Option<String>,
    score: Option<f32>,
}

impl HitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn doc_ref(mut self, doc_ref: &str) -> Self {
        self.doc_ref = Some(doc_ref.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn build(self) -> RetrievalHit {
        let id = self.id.unwrap_or_else(|| "chunk:0".to_string());
        RetrievalHit::new(
            id.clone(),
            self.text.unwrap_or_else(|| format!("text of {}", id)),
            self.doc_ref.unwrap_or_else(|| "doc.txt".to_string()),
            self.score.unwrap_or(1.0),
        )
    }
}
