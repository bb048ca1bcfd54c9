use super::*;
use crate::retrieval::cosine_similarity;
use std::path::PathBuf;

#[test]
fn test_config_default_is_stub() {
    let config = EncoderConfig::default();

    assert!(config.model_path.is_none());
    assert_eq!(config.embedding_dim, ENCODER_EMBEDDING_DIM);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_new() {
    let config = EncoderConfig::new("/models/minilm");
    assert_eq!(config.model_path, Some(PathBuf::from("/models/minilm")));
}

#[test]
fn test_config_validate_rejects_zero_dim() {
    let config = EncoderConfig::stub().with_embedding_dim(0);
    assert!(matches!(
        config.validate(),
        Err(EmbeddingError::InvalidConfig { .. })
    ));
}

#[test]
fn test_load_missing_model() {
    let result = BertEncoder::load(EncoderConfig::new("/nonexistent/minilm"));
    assert!(matches!(result, Err(EmbeddingError::ModelNotFound { .. })));
}

#[test]
fn test_load_incomplete_model_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), "{}").unwrap();

    let result = BertEncoder::load(EncoderConfig::new(dir.path()));
    assert!(matches!(result, Err(EmbeddingError::ModelLoadFailed { .. })));
}

#[test]
fn test_stub_encoding_is_unit_length_and_deterministic() {
    let encoder = BertEncoder::stub().unwrap();
    assert!(encoder.is_stub());

    let a = encoder.encode("refund policy for annual plans").unwrap();
    let b = encoder.encode("refund policy for annual plans").unwrap();

    assert_eq!(a.len(), ENCODER_EMBEDDING_DIM);
    assert_eq!(a, b);
    let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5);
}

#[test]
fn test_stub_encoding_prefers_shared_words() {
    let encoder = BertEncoder::stub().unwrap();

    let query = encoder.encode("refund policy").unwrap();
    let related = encoder.encode("our refund policy allows returns").unwrap();
    let unrelated = encoder.encode("kubernetes deployment manifests").unwrap();

    assert!(cosine_similarity(&query, &related) > cosine_similarity(&query, &unrelated));
}

#[test]
fn test_stub_encoding_of_stop_words_is_zero() {
    let encoder = BertEncoder::stub().unwrap();
    let embedding = encoder.encode("what is the").unwrap();

    assert!(embedding.iter().all(|&x| x == 0.0));
}

#[test]
fn test_encode_batch_matches_single() {
    let encoder = BertEncoder::stub().unwrap();
    let batch = encoder.encode_batch(&["alpha beta", "gamma"]).unwrap();

    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0], encoder.encode("alpha beta").unwrap());
    assert_eq!(encoder.dimension(), ENCODER_EMBEDDING_DIM);
}
