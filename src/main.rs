//! Verdict CLI entrypoint: answers one question against a local corpus and prints the
//! decision trace.

use std::sync::Arc;

use mimalloc::MiMalloc;

use verdict::config::{Config, EngineConfig};
use verdict::corpus::load_corpus;
use verdict::embedding::{BertEncoder, EncoderConfig, RerankerConfig};
use verdict::engine::DecisionEngine;
use verdict::rerank::CrossEncoderScorer;
use verdict::retrieval::{Bm25Index, MemoryVectorIndex, QdrantVectorSearch, VectorBackend};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: verdict <question>

Environment:
  VERDICT_CORPUS_PATH      JSON-lines chunk file (default ./data/chunks.jsonl)
  VERDICT_QDRANT_URL       use Qdrant for vector search instead of memory
  VERDICT_ENCODER_PATH     sentence encoder model directory (stub if unset)
  VERDICT_RERANKER_PATH    cross-encoder model directory (stub if unset)
  RUST_LOG                 tracing filter, e.g. verdict=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }
    let question = args.join(" ");

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    config.validate()?;
    let engine_config = EngineConfig::from_env()?;
    engine_config.validate()?;

    tracing::info!(
        corpus = %config.corpus_path.display(),
        qdrant = config.qdrant_url.as_deref().unwrap_or("-"),
        "Verdict starting"
    );

    let chunks = load_corpus(&config.corpus_path)?;

    let encoder = Arc::new(BertEncoder::load(EncoderConfig::from_env())?);

    let vector = match &config.qdrant_url {
        Some(url) => {
            let search = QdrantVectorSearch::new(url, &config.qdrant_collection, encoder)?;
            if let Err(e) = search.health_check().await {
                tracing::warn!("Qdrant health check failed: {}. Vector signal may degrade.", e);
            }
            VectorBackend::Qdrant(search)
        }
        None => VectorBackend::Memory(MemoryVectorIndex::build(encoder, chunks.clone())?),
    };
    let lexical = Bm25Index::new(chunks);

    let reranker_config = RerankerConfig::from_env();
    if reranker_config.model_path.is_none() {
        tracing::warn!("No VERDICT_RERANKER_PATH configured, running reranker in stub mode");
    }
    let scorer = CrossEncoderScorer::new(reranker_config)?;

    let engine = DecisionEngine::new(vector, lexical, scorer);

    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let trace = engine
        .build_decision_trace_until(&question, &engine_config, ctrl_c)
        .await?;

    tracing::info!(
        fingerprint = trace.query_fingerprint(),
        sufficient = trace.sufficiency().is_sufficient(),
        degraded = trace.is_degraded(),
        "Decision trace built"
    );

    println!("{}", trace);
    println!();
    println!("{}", trace.to_json()?);

    Ok(())
}
