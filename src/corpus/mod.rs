//! Loading of pre-chunked corpus records.
//!
//! Chunking and registry reconciliation happen upstream; this module only reads their
//! output (one JSON object per line) so the in-memory backends can be populated.
//!
//! ```text
//! {"id": "handbook.pdf:3:0", "doc_ref": "handbook.pdf", "text": "..."}
//! {"doc_ref": "faq.txt", "text": "..."}
//! ```
//!
//! Records without an `id` get one from [`derive_chunk_id`].

use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::hashing::derive_chunk_id;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record on line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("duplicate chunk id '{id}' on line {line}")]
    DuplicateId { id: String, line: usize },
}

/// A chunk ready to be indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: String,
    pub doc_ref: String,
    pub text: String,
}

impl ChunkRecord {
    pub fn new(id: impl Into<String>, doc_ref: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            doc_ref: doc_ref.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    id: Option<String>,
    doc_ref: String,
    text: String,
}

/// Reads a JSON-lines corpus file.
pub fn load_corpus(path: &Path) -> Result<Vec<ChunkRecord>, CorpusError> {
    let file = std::fs::File::open(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_corpus(std::io::BufReader::new(file)).map_err(|e| match e {
        CorpusError::Io { source, .. } => CorpusError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    info!(path = %path.display(), chunks = records.len(), "Corpus loaded");
    Ok(records)
}

/// Parses JSON-lines records from any reader.
pub fn parse_corpus<R: BufRead>(reader: R) -> Result<Vec<ChunkRecord>, CorpusError> {
    let mut records = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| CorpusError::Io {
            path: PathBuf::new(),
            source,
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let raw: RawRecord =
            serde_json::from_str(&line).map_err(|e| CorpusError::Malformed {
                line: line_no,
                reason: e.to_string(),
            })?;

        if raw.text.trim().is_empty() {
            warn!(line = line_no, doc_ref = %raw.doc_ref, "Skipping record with empty text");
            continue;
        }

        let position = positions.entry(raw.doc_ref.clone()).or_insert(0);
        let id = match raw.id.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(id) => id,
            None => derive_chunk_id(&raw.doc_ref, *position, &raw.text),
        };
        *position += 1;

        if !seen.insert(id.clone()) {
            return Err(CorpusError::DuplicateId { id, line: line_no });
        }

        records.push(ChunkRecord {
            id,
            doc_ref: raw.doc_ref,
            text: raw.text,
        });
    }

    debug!(records = records.len(), "Parsed corpus records");
    Ok(records)
}
