//! Result scoring strategies.
//!
//! Scoring is a strategy seam: the searcher takes any [`Scorer`], so a
//! frequency-aware ranker can be swapped in without touching query
//! compilation or execution. The default [`BoostScorer`] multiplies the
//! document boost by the query boost and is not term-frequency aware.

use std::fmt::Debug;

use crate::document::IndexedDocument;

/// Trait for scoring one matching document.
pub trait Scorer: Send + Sync + Debug {
    /// Compute the relevance score for a matching document.
    fn score(&self, doc: &IndexedDocument, query_boost: f32) -> f32;
}

/// The default scorer: `document.boost * query.boost`.
#[derive(Debug, Clone, Default)]
pub struct BoostScorer;

impl BoostScorer {
    /// Create a new boost scorer.
    pub fn new() -> Self {
        BoostScorer
    }
}

impl Scorer for BoostScorer {
    fn score(&self, doc: &IndexedDocument, query_boost: f32) -> f32 {
        doc.boost * query_boost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boost_scorer_multiplies() {
        let mut doc = IndexedDocument::new("d1");
        doc.boost = 2.0;

        let scorer = BoostScorer::new();
        assert_eq!(scorer.score(&doc, 1.5), 3.0);
        assert_eq!(scorer.score(&doc, 1.0), 2.0);
    }

    #[test]
    fn test_default_boosts_give_unit_score() {
        let doc = IndexedDocument::new("d1");
        let scorer = BoostScorer::new();
        assert_eq!(scorer.score(&doc, 1.0), 1.0);
    }
}
