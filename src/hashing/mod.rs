use blake3::Hasher;

/// Hex BLAKE3 digest of the query text, used to correlate traces in logs.
#[inline]
pub fn query_fingerprint(query: &str) -> String {
    blake3::hash(query.as_bytes()).to_hex().to_string()
}

/// Derives a stable chunk identifier from its document, position and content.
///
/// The first 16 bytes of the digest are kept; the document reference and position are
/// hashed alongside the text so identical passages in different places stay distinct.
pub fn derive_chunk_id(doc_ref: &str, position: usize, text: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(doc_ref.as_bytes());
    hasher.update(b"|");
    hasher.update(&(position as u64).to_le_bytes());
    hasher.update(b"|");
    hasher.update(text.as_bytes());

    let hash = hasher.finalize();
    let hex = hash.to_hex();
    format!("{}:{}", doc_ref, &hex.as_str()[..32])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_fingerprint_is_deterministic() {
        assert_eq!(
            query_fingerprint("what is the refund policy"),
            query_fingerprint("what is the refund policy")
        );
        assert_ne!(query_fingerprint("a"), query_fingerprint("b"));
        assert_eq!(query_fingerprint("x").len(), 64);
    }

    #[test]
    fn test_derive_chunk_id_depends_on_position_and_doc() {
        let a = derive_chunk_id("handbook.pdf", 0, "same text");
        let b = derive_chunk_id("handbook.pdf", 1, "same text");
        let c = derive_chunk_id("policy.pdf", 0, "same text");

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, derive_chunk_id("handbook.pdf", 0, "same text"));
        assert!(a.starts_with("handbook.pdf:"));
    }
}
