//! Phrase query: substring match over a field's stored value.

use crate::error::Result;
use crate::query::filter::Filter;
use crate::query::Query;

/// A query that matches documents whose stored value for a field contains
/// the space-joined phrase terms as a case-insensitive substring.
///
/// This is a substring approximation, not positional phrase matching: it
/// under-matches when punctuation or extra whitespace separates the words in
/// the original text, and over-matches when unrelated text happens to
/// contain the phrase. `slop` is accepted for API compatibility but unused
/// by the default compiler.
#[derive(Debug, Clone)]
pub struct PhraseQuery {
    field: String,
    terms: Vec<String>,
    slop: u32,
    boost: f32,
}

impl PhraseQuery {
    /// Create a new phrase query from the given terms.
    pub fn new(field: impl Into<String>, terms: Vec<String>) -> Self {
        PhraseQuery {
            field: field.into(),
            terms,
            slop: 0,
            boost: 1.0,
        }
    }

    /// Set the slop. Accepted for API compatibility; the default predicate
    /// compiler ignores it.
    pub fn with_slop(mut self, slop: u32) -> Self {
        self.slop = slop;
        self
    }

    /// Set the boost factor for this query.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the phrase terms.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Get the slop.
    pub fn slop(&self) -> u32 {
        self.slop
    }
}

impl Query for PhraseQuery {
    fn filter(&self) -> Result<Filter> {
        Ok(Filter::StoredContains {
            field: self.field.clone(),
            needle: self.terms.join(" ").to_lowercase(),
        })
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        let phrase = format!("{}:\"{}\"", self.field, self.terms.join(" "));
        if self.boost == 1.0 {
            phrase
        } else {
            format!("{}^{}", phrase, self.boost)
        }
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}
