//! Score normalization and hybrid candidate fusion.
//!
//! Vector and lexical hits arrive on unrelated scales. [`normalize`] maps each signal onto
//! `[0, 1]` independently and [`fuse`] merges them into deduplicated [`Candidate`]s with a
//! weighted sum, so a chunk found by only one signal still competes (its missing signal
//! counts as zero).

pub mod fuser;
pub mod normalize;
pub mod types;


pub use fuser::{assert_unique_ids, fuse};
pub use normalize::{NormalizationPolicy, ScoreDirection, VectorScoreKind, normalize};
pub use types::{Candidate, Chunk, NormalizedHit};
