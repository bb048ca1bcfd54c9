use std::collections::HashSet;

use crate::constants::is_stop_word;
use crate::rerank::RerankedCandidate;
use crate::retrieval::tokenize;

/// Finds the parts of a query that the usable evidence does not address.
pub trait CoverageStrategy: Send + Sync {
    /// Returns uncovered aspects in query order.
    fn uncovered_aspects(&self, query: &str, usable: &[RerankedCandidate]) -> Vec<String>;
}

/// Term-overlap coverage.
///
/// Aspects are the query's content terms. A term is covered when some usable token equals
/// it or both share a prefix of at least `prefix_len` characters, so `refunds` covers
/// `refunded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermCoverage {
    pub min_term_len: usize,
    pub prefix_len: usize,
}

impl Default for TermCoverage {
    fn default() -> Self {
        Self {
            min_term_len: 3,
            prefix_len: 5,
        }
    }
}

impl TermCoverage {
    /// Content terms of `query`, deduplicated, in order of first appearance.
    pub fn aspects(&self, query: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        tokenize(query)
            .into_iter()
            .filter(|t| t.chars().count() >= self.min_term_len && !is_stop_word(t))
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }

    fn covers(&self, aspect: &str, token: &str) -> bool {
        if aspect == token {
            return true;
        }
        let a: Vec<char> = aspect.chars().take(self.prefix_len).collect();
        let b: Vec<char> = token.chars().take(self.prefix_len).collect();
        a.len() == self.prefix_len && a == b
    }
}

impl CoverageStrategy for TermCoverage {
    fn uncovered_aspects(&self, query: &str, usable: &[RerankedCandidate]) -> Vec<String> {
        let tokens: HashSet<String> = usable.iter().flat_map(|c| tokenize(c.text())).collect();

        self.aspects(query)
            .into_iter()
            .filter(|aspect| !tokens.iter().any(|token| self.covers(aspect, token)))
            .collect()
    }
}
