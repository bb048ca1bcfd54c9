use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::types::{Candidate, Chunk, NormalizedHit};
use crate::config::FusionWeights;

/// Merges the normalized vector and lexical lists into one candidate per chunk id.
///
/// `fused = w_v * vector + w_l * lexical`, where a signal that did not return the chunk
/// contributes `0.0`. Output is ordered by fused score descending, then chunk id.
pub fn fuse(
    vector: &[NormalizedHit],
    lexical: &[NormalizedHit],
    weights: FusionWeights,
) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::with_capacity(vector.len() + lexical.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(vector.len() + lexical.len());

    for hit in vector {
        if index.contains_key(hit.chunk_id.as_str()) {
            continue;
        }
        index.insert(&hit.chunk_id, candidates.len());
        candidates.push(Candidate {
            chunk: Chunk {
                id: hit.chunk_id.clone(),
                text: hit.text.clone(),
                doc_ref: hit.doc_ref.clone(),
                vector_raw: Some(hit.raw_score),
                lexical_raw: None,
            },
            from_vector: true,
            from_lexical: false,
            vector_score: hit.score,
            lexical_score: 0.0,
            fused_score: 0.0,
        });
    }

    for hit in lexical {
        match index.get(hit.chunk_id.as_str()) {
            Some(&idx) => {
                let candidate = &mut candidates[idx];
                if candidate.from_lexical {
                    continue;
                }
                candidate.from_lexical = true;
                candidate.lexical_score = hit.score;
                candidate.chunk.lexical_raw = Some(hit.raw_score);
            }
            None => {
                index.insert(&hit.chunk_id, candidates.len());
                candidates.push(Candidate {
                    chunk: Chunk {
                        id: hit.chunk_id.clone(),
                        text: hit.text.clone(),
                        doc_ref: hit.doc_ref.clone(),
                        vector_raw: None,
                        lexical_raw: Some(hit.raw_score),
                    },
                    from_vector: false,
                    from_lexical: true,
                    vector_score: 0.0,
                    lexical_score: hit.score,
                    fused_score: 0.0,
                });
            }
        }
    }

    for candidate in &mut candidates {
        candidate.fused_score =
            weights.vector * candidate.vector_score + weights.lexical * candidate.lexical_score;
    }

    candidates.sort_by(|a, b| {
        b.fused_score
            .partial_cmp(&a.fused_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.chunk.id.cmp(&b.chunk.id))
    });

    debug!(
        vector = vector.len(),
        lexical = lexical.len(),
        fused = candidates.len(),
        hybrid = candidates.iter().filter(|c| c.is_hybrid()).count(),
        "Fused candidate lists"
    );

    candidates
}

/// Panics if two candidates share a chunk id.
pub fn assert_unique_ids(candidates: &[Candidate]) {
    let mut seen = HashSet::with_capacity(candidates.len());
    for candidate in candidates {
        assert!(
            seen.insert(candidate.id()),
            "duplicate chunk id '{}' after fusion",
            candidate.id()
        );
    }
}
