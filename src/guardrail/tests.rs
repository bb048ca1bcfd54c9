use super::*;
use crate::config::ConfidenceThresholds;
use crate::confidence::estimate_confidence;
use crate::evidence::select_evidence;
use crate::fusion::{Candidate, Chunk};
use crate::rerank::RerankedCandidate;

fn reranked(id: &str, doc_ref: &str, text: &str, relevance: f32) -> RerankedCandidate {
    RerankedCandidate::new(
        Candidate {
            chunk: Chunk {
                id: id.to_string(),
                text: text.to_string(),
                doc_ref: doc_ref.to_string(),
                vector_raw: Some(0.5),
                lexical_raw: Some(2.0),
            },
            from_vector: true,
            from_lexical: true,
            vector_score: 1.0,
            lexical_score: 1.0,
            fused_score: 1.0,
        },
        relevance,
    )
}

fn kinds(gaps: &[GapNote]) -> Vec<GapKind> {
    gaps.iter().map(|g| g.kind).collect()
}

#[test]
fn test_aspects_drop_short_and_stop_words() {
    let coverage = TermCoverage::default();

    assert_eq!(
        coverage.aspects("What is the refund window for EU orders, and the refund fee?"),
        vec!["refund", "window", "orders", "fee"]
    );
}

#[test]
fn test_prefix_match_covers_inflections() {
    let coverage = TermCoverage::default();
    let usable = vec![reranked("a", "d", "Refunded orders ship back within days", 0.9)];

    let uncovered = coverage.uncovered_aspects("refunds for orders", &usable);

    assert!(uncovered.is_empty());
}

#[test]
fn test_short_prefix_does_not_cover() {
    let coverage = TermCoverage::default();
    let usable = vec![reranked("a", "d", "The cat sat", 0.9)];

    assert_eq!(coverage.uncovered_aspects("cats", &usable), vec!["cats"]);
}

#[test]
fn test_uncovered_aspects_in_query_order() {
    let coverage = TermCoverage::default();
    let usable = vec![reranked("a", "d", "Shipping takes five days.", 0.9)];

    let uncovered = coverage.uncovered_aspects("warranty shipping insurance", &usable);

    assert_eq!(uncovered, vec!["warranty", "insurance"]);
}

#[test]
fn test_causal_marker_detection() {
    assert!(has_causal_marker("Sales fell because prices rose."));
    assert!(has_causal_marker("Outage was due to a failed disk"));
    assert!(has_causal_marker("As a result, latency grew"));
    assert!(!has_causal_marker("Sales fell in March."));
    assert!(!has_causal_marker("The sincere apology"));
}

#[test]
fn test_asks_why() {
    assert!(asks_why("Why did revenue drop?"));
    assert!(!asks_why("Whyte report summary"));
}

#[test]
fn test_empty_evidence_is_insufficient() {
    let bundle = select_evidence(Vec::new(), 10, 0.1);
    let confidence = estimate_confidence(&bundle, ConfidenceThresholds::default(), 3);

    let gaps = analyze_gaps("refund policy", &bundle, &TermCoverage::default());
    let outcome = assess(&bundle, &confidence, gaps);

    assert_eq!(outcome.sufficiency, Sufficiency::Insufficient);
    assert_eq!(outcome.rule, SufficiencyRule::NoUsableEvidence);
    assert!(!outcome.gaps.is_empty());
    assert_eq!(outcome.gaps.last().unwrap().kind, GapKind::Sufficiency);
    assert!(kinds(&outcome.gaps).contains(&GapKind::UncoveredAspect));
}

#[test]
fn test_low_confidence_is_partial() {
    let bundle = select_evidence(
        vec![
            reranked("a", "d1", "refund policy text", 0.15),
            reranked("b", "d2", "refund policy again", 0.12),
        ],
        10,
        0.1,
    );
    let confidence = estimate_confidence(&bundle, ConfidenceThresholds::default(), 3);
    assert_eq!(confidence.label, ConfidenceLabel::Low);

    let gaps = analyze_gaps("refund policy", &bundle, &TermCoverage::default());
    let outcome = assess(&bundle, &confidence, gaps);

    assert_eq!(outcome.sufficiency, Sufficiency::Partial);
    assert_eq!(kinds(&outcome.gaps), vec![GapKind::Sufficiency]);
    assert!(outcome.gaps[0].detail.contains("low"));
}

#[test]
fn test_supported_is_sufficient_without_rule_note() {
    let bundle = select_evidence(
        vec![
            reranked("a", "d1", "The refund policy allows returns", 0.9),
            reranked("b", "d2", "Refund policy exceptions", 0.8),
        ],
        10,
        0.1,
    );
    let confidence = estimate_confidence(&bundle, ConfidenceThresholds::default(), 3);

    let gaps = analyze_gaps("refund policy", &bundle, &TermCoverage::default());
    let outcome = assess(&bundle, &confidence, gaps);

    assert_eq!(outcome.sufficiency, Sufficiency::Sufficient);
    assert!(outcome.gaps.is_empty());
}

#[test]
fn test_single_source_note() {
    let bundle = select_evidence(
        vec![
            reranked("a", "handbook.pdf", "refund policy", 0.9),
            reranked("b", "handbook.pdf", "refund timing", 0.7),
        ],
        10,
        0.1,
    );

    let gaps = analyze_gaps("refund policy", &bundle, &TermCoverage::default());

    assert_eq!(kinds(&gaps), vec![GapKind::SingleSource]);
    assert!(gaps[0].detail.contains("handbook.pdf"));
}

#[test]
fn test_causal_question_note() {
    let descriptive = select_evidence(
        vec![
            reranked("a", "d1", "Revenue dropped in March", 0.9),
            reranked("b", "d2", "Revenue figures by month", 0.8),
        ],
        10,
        0.1,
    );
    let causal = select_evidence(
        vec![
            reranked("a", "d1", "Revenue dropped because demand fell", 0.9),
            reranked("b", "d2", "Revenue figures by month", 0.8),
        ],
        10,
        0.1,
    );
    let query = "Why did revenue drop?";

    let gaps = analyze_gaps(query, &descriptive, &TermCoverage::default());
    assert!(kinds(&gaps).contains(&GapKind::CausalQuestion));

    let gaps = analyze_gaps(query, &causal, &TermCoverage::default());
    assert!(!kinds(&gaps).contains(&GapKind::CausalQuestion));
}

#[test]
fn test_pluggable_coverage_strategy() {
    struct NothingCovered;

    impl CoverageStrategy for NothingCovered {
        fn uncovered_aspects(&self, query: &str, _usable: &[RerankedCandidate]) -> Vec<String> {
            vec![query.to_string()]
        }
    }

    let bundle = select_evidence(Vec::new(), 10, 0.1);
    let gaps = analyze_gaps("anything at all", &bundle, &NothingCovered);

    assert_eq!(gaps.len(), 1);
    assert!(gaps[0].detail.contains("anything at all"));
}

#[test]
fn test_only_sufficient_verdict_is_sufficient() {
    assert!(Sufficiency::Sufficient.is_sufficient());
    assert!(!Sufficiency::Partial.is_sufficient());
    assert!(!Sufficiency::Insufficient.is_sufficient());
    assert!(SufficiencyRule::Supported.verdict().is_sufficient());
    assert!(!SufficiencyRule::LowConfidence.verdict().is_sufficient());
}

#[test]
fn test_sufficiency_display() {
    assert_eq!(Sufficiency::Sufficient.to_string(), "SUFFICIENT");
    assert_eq!(Sufficiency::Partial.to_string(), "PARTIAL");
    assert_eq!(Sufficiency::Insufficient.to_string(), "INSUFFICIENT");
    assert_eq!(
        serde_json::to_string(&Sufficiency::Insufficient).unwrap(),
        "\"INSUFFICIENT\""
    );
}
