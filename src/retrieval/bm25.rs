//! In-memory Okapi BM25 keyword index.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use super::{LexicalSearch, RetrievalHit, SearchError, tokenize};
use crate::corpus::ChunkRecord;

/// Term-frequency saturation.
pub const BM25_K1: f32 = 1.2;

/// Length normalization strength.
pub const BM25_B: f32 = 0.75;

/// BM25 index over chunk text. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Bm25Index {
    chunks: Vec<ChunkRecord>,
    doc_lengths: Vec<u32>,
    postings: HashMap<String, Vec<(usize, u32)>>,
    avg_doc_len: f32,
}

impl Bm25Index {
    pub fn new(chunks: Vec<ChunkRecord>) -> Self {
        let mut postings: HashMap<String, Vec<(usize, u32)>> = HashMap::new();
        let mut doc_lengths = Vec::with_capacity(chunks.len());

        for (idx, chunk) in chunks.iter().enumerate() {
            let tokens = tokenize(&chunk.text);
            doc_lengths.push(tokens.len() as u32);

            let mut tf: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *tf.entry(token).or_insert(0) += 1;
            }
            for (term, count) in tf {
                postings.entry(term).or_default().push((idx, count));
            }
        }

        let total: u64 = doc_lengths.iter().map(|&l| l as u64).sum();
        let avg_doc_len = if doc_lengths.is_empty() {
            0.0
        } else {
            total as f32 / doc_lengths.len() as f32
        };

        debug!(
            chunks = chunks.len(),
            terms = postings.len(),
            avg_doc_len = avg_doc_len,
            "Built BM25 index"
        );

        Self {
            chunks,
            doc_lengths,
            postings,
            avg_doc_len,
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Inverse document frequency, floored at zero.
    pub fn idf(&self, term: &str) -> f32 {
        let df = self.postings.get(term).map(|p| p.len()).unwrap_or(0);
        if df == 0 {
            return 0.0;
        }
        let n = self.chunks.len() as f32;
        let df = df as f32;
        let ratio = (n - df + 0.5) / (df + 0.5);
        (1.0 + ratio.max(0.0)).ln()
    }

    /// Scores every chunk sharing a term with `query` and returns the best `k`.
    ///
    /// Chunks scoring zero are omitted; ties are ordered by chunk id.
    pub fn search(&self, query: &str, k: usize) -> Vec<RetrievalHit> {
        let terms = tokenize(query);
        if terms.is_empty() || self.chunks.is_empty() || k == 0 {
            return Vec::new();
        }

        let mut scores: HashMap<usize, f32> = HashMap::new();
        for term in &terms {
            let Some(postings) = self.postings.get(term) else {
                continue;
            };
            let idf = self.idf(term);

            for &(idx, tf) in postings {
                let dl = self.doc_lengths[idx] as f32;
                let norm = if self.avg_doc_len > 0.0 {
                    1.0 - BM25_B + BM25_B * (dl / self.avg_doc_len)
                } else {
                    1.0
                };
                let tf = tf as f32;
                let contribution = idf * (tf * (BM25_K1 + 1.0)) / (tf + BM25_K1 * norm);
                *scores.entry(idx).or_insert(0.0) += contribution;
            }
        }

        let mut ranked: Vec<(usize, f32)> = scores
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .collect();

        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| self.chunks[a.0].id.cmp(&self.chunks[b.0].id))
        });
        ranked.truncate(k);

        ranked
            .into_iter()
            .map(|(idx, score)| {
                let chunk = &self.chunks[idx];
                RetrievalHit::new(&chunk.id, &chunk.text, &chunk.doc_ref, score)
            })
            .collect()
    }
}

impl LexicalSearch for Bm25Index {
    async fn lexical_search(&self, query: &str, k: usize) -> Result<Vec<RetrievalHit>, SearchError> {
        Ok(self.search(query, k))
    }
}
