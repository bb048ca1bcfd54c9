//! End-to-end pipeline tests over the shipped in-memory backends.

mod common;

use std::time::Duration;

use common::fixtures::{HitBuilder, sample_chunks, stub_engine};
use verdict::{
    ConfidenceLabel, DecisionEngine, EngineConfig, EngineError, FailingSearch, GapKind,
    StaticScorer, StaticSearch, Sufficiency, TraceNote, UnavailableReranker,
};

#[tokio::test]
async fn test_refund_question_finds_refund_evidence() {
    let engine = stub_engine();

    let trace = engine
        .build_decision_trace("How do I request a refund?", &EngineConfig::default())
        .await
        .unwrap();

    assert!(!trace.usable().is_empty());
    assert!(trace.usable()[0].text().to_lowercase().contains("refund"));
    assert_ne!(trace.sufficiency(), Sufficiency::Insufficient);
    assert!(trace.notes().is_empty());
}

#[tokio::test]
async fn test_partition_covers_reranked_set() {
    let engine = stub_engine();
    let config = EngineConfig::default().with_evidence_cap(2);

    let trace = engine
        .build_decision_trace("refund support office holidays", &config)
        .await
        .unwrap();

    assert!(trace.usable().len() <= 2);
    let mut ids: Vec<&str> = trace
        .usable()
        .iter()
        .chain(trace.ignored())
        .map(|c| c.id())
        .collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
    assert_eq!(total, trace.evidence().len());
}

#[tokio::test]
async fn test_reranked_order_is_monotonic() {
    let engine = stub_engine();

    let trace = engine
        .build_decision_trace("refund for digital downloads", &EngineConfig::default())
        .await
        .unwrap();

    let all: Vec<_> = trace.usable().iter().chain(trace.ignored()).collect();
    for pair in all.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(a.relevance >= b.relevance);
        if a.relevance == b.relevance {
            assert!(a.fused_score() >= b.fused_score());
            if a.fused_score() == b.fused_score() {
                assert!(a.id() < b.id());
            }
        }
    }
}

#[tokio::test]
async fn test_unmatched_question_is_insufficient() {
    let engine = stub_engine();
    let config = EngineConfig::default().with_relevance_threshold(0.5);

    let trace = engine
        .build_decision_trace("quantum chromodynamics lattice", &config)
        .await
        .unwrap();

    assert!(trace.usable().is_empty());
    assert_eq!(trace.sufficiency(), Sufficiency::Insufficient);
    assert_eq!(trace.confidence().label, ConfidenceLabel::Low);
    assert!(
        trace
            .gaps()
            .iter()
            .any(|g| g.kind == GapKind::UncoveredAspect && g.detail.contains("quantum"))
    );
}

#[tokio::test]
async fn test_traces_are_reproducible() {
    let engine = stub_engine();
    let config = EngineConfig::default();

    let first = engine
        .build_decision_trace("When is the support office closed?", &config)
        .await
        .unwrap();
    let second = engine
        .build_decision_trace("When is the support office closed?", &config)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[tokio::test]
async fn test_concurrent_queries_share_engine() {
    let engine = std::sync::Arc::new(stub_engine());
    let config = EngineConfig::default();

    let queries = ["refund window", "office hours", "international shipping"];
    let handles: Vec<_> = queries
        .iter()
        .map(|q| {
            let engine = std::sync::Arc::clone(&engine);
            let config = config.clone();
            let q = q.to_string();
            tokio::spawn(async move { engine.build_decision_trace(&q, &config).await })
        })
        .collect();

    for (handle, query) in handles.into_iter().zip(queries) {
        let trace = handle.await.unwrap().unwrap();
        assert_eq!(trace.query(), query);
    }
}

#[tokio::test]
async fn test_single_source_never_high() {
    let vector = StaticSearch::new(vec![
        HitBuilder::new().id("a").doc_ref("only.pdf").text("refund rules").score(0.9).build(),
        HitBuilder::new().id("b").doc_ref("only.pdf").text("refund timing").score(0.8).build(),
    ]);
    let scorer = StaticScorer::new([("a", 1.0), ("b", 1.0)]);
    let engine = DecisionEngine::new(vector, StaticSearch::empty(), scorer);

    let trace = engine
        .build_decision_trace("refund rules", &EngineConfig::default())
        .await
        .unwrap();

    assert_eq!(trace.usable().len(), 2);
    assert_ne!(trace.confidence().label, ConfidenceLabel::High);
    assert!(trace.confidence().single_source_capped);
    assert!(trace.gaps().iter().any(|g| g.kind == GapKind::SingleSource));
}

#[tokio::test]
async fn test_degraded_backends_still_answer() {
    let chunks = sample_chunks();
    let engine = DecisionEngine::new(
        FailingSearch::new("vector store offline"),
        verdict::Bm25Index::new(chunks),
        UnavailableReranker,
    );

    let trace = engine
        .build_decision_trace("refund", &EngineConfig::default())
        .await
        .unwrap();

    assert_eq!(trace.notes().len(), 2);
    assert!(matches!(trace.notes()[0], TraceNote::DegradedFusion { .. }));
    assert!(matches!(trace.notes()[1], TraceNote::DegradedReranking { .. }));
    assert!(!trace.usable().is_empty());
    for item in trace.usable() {
        assert_eq!(item.relevance, item.fused_score());
        assert!(item.candidate.from_lexical);
    }
}

#[tokio::test]
async fn test_deadline_abandons_query() {
    let engine = DecisionEngine::new(
        StaticSearch::empty(),
        StaticSearch::empty(),
        StaticScorer::default().with_delay(Duration::from_secs(5)),
    );
    let lexical_engine = DecisionEngine::new(
        StaticSearch::empty(),
        StaticSearch::new(vec![HitBuilder::new().id("x").build()]),
        StaticScorer::new([("x", 0.9)]).with_delay(Duration::from_secs(5)),
    );
    let config = EngineConfig::default().with_query_timeout(Duration::from_millis(50));

    // Nothing to rerank, so the slow scorer is never awaited.
    assert!(engine.build_decision_trace("q", &config).await.is_ok());

    let err = lexical_engine
        .build_decision_trace("q", &config)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_report_lists_used_evidence() {
    let engine = stub_engine();

    let trace = engine
        .build_decision_trace("refund within 30 days", &EngineConfig::default())
        .await
        .unwrap();
    let report = trace.to_string();

    assert!(report.contains("Used Evidence:"));
    assert!(report.contains("refund_policy.pdf"));
    assert!(report.contains(&format!("Sufficiency: {}", trace.sufficiency())));
}
