//! Term query: exact match against a field's term list.

use crate::error::Result;
use crate::query::filter::Filter;
use crate::query::Query;

/// A query that matches documents whose term list for a field contains an
/// exact term.
///
/// Matching is case-sensitive: callers normalize case through the analyzer
/// before constructing a term query against analyzed fields.
#[derive(Debug, Clone)]
pub struct TermQuery {
    field: String,
    term: String,
    boost: f32,
}

impl TermQuery {
    /// Create a new term query.
    pub fn new(field: impl Into<String>, term: impl Into<String>) -> Self {
        TermQuery {
            field: field.into(),
            term: term.into(),
            boost: 1.0,
        }
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

    /// Get the term.
    pub fn term(&self) -> &str {
        &self.term
    }
}

impl Query for TermQuery {
    fn filter(&self) -> Result<Filter> {
        Ok(Filter::TermContains {
            field: self.field.clone(),
            term: self.term.clone(),
        })
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        if self.boost == 1.0 {
            format!("{}:{}", self.field, self.term)
        } else {
            format!("{}:{}^{}", self.field, self.term, self.boost)
        }
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}
