use std::io;
use std::path::Path;
use tokenizers::{Tokenizer, TruncationParams};

/// Loads `tokenizer.json` from a model directory, truncating inputs to `max_len` tokens.
///
/// Cross-encoders see `query + passage` as one sequence, so truncation must be on or long
/// passages overflow the position embeddings.
pub fn load_tokenizer(model_dir: &Path, max_len: usize) -> io::Result<Tokenizer> {
    let tokenizer_path = model_dir.join("tokenizer.json");
    let mut tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;

    Ok(tokenizer)
}

/// Checks that a model directory holds `config.json`, `model.safetensors` and `tokenizer.json`.
pub fn missing_model_files(model_dir: &Path) -> Vec<&'static str> {
    ["config.json", "model.safetensors", "tokenizer.json"]
        .into_iter()
        .filter(|name| !model_dir.join(name).exists())
        .collect()
}
