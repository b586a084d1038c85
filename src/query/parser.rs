//! Best-effort query-string parser.
//!
//! Converts a free-text query string into a query tree over a default field.
//! The parser never fails: malformed input degrades to a plain term query.
//!
//! This is a deliberately simple, non-recursive parser. Boolean operators are
//! split left to right with no precedence and no grouping; parentheses are
//! not supported. `a OR b AND c` is therefore interpreted by token order, not
//! by formal precedence.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::{Analyzer, StandardAnalyzer};
use crate::query::boolean::{BooleanClause, BooleanQuery, Occur};
use crate::query::phrase::PhraseQuery;
use crate::query::term::TermQuery;
use crate::query::Query;

lazy_static! {
    static ref OPERATOR_PATTERN: Regex = Regex::new(r"(?i)\s+(AND|OR|NOT)\s+").unwrap();
}

/// Parser for free-text query strings.
///
/// # Rules, in priority order
///
/// 1. Blank input produces a degenerate term query with an empty term.
/// 2. Input wrapped in double quotes becomes a phrase query over the
///    analyzed interior.
/// 3. Input containing ` AND `, ` OR `, or ` NOT ` (case-insensitive) is
///    split into term queries attached to a boolean query; the occurrence of
///    each segment comes from the operator preceding it, and the first
///    segment defaults to Should.
/// 4. Anything else becomes a single term query with the lower-cased,
///    trimmed input.
///
/// # Example
///
/// ```
/// use calla::query::QueryParser;
///
/// let parser = QueryParser::new("content");
/// let query = parser.parse("rust AND async");
/// assert_eq!(query.description(), "(content:rust +content:async)");
/// ```
#[derive(Debug)]
pub struct QueryParser {
    default_field: String,
    analyzer: Arc<dyn Analyzer>,
}

impl QueryParser {
    /// Create a new parser over the given default field, using the standard
    /// analyzer for phrase interiors.
    pub fn new(default_field: impl Into<String>) -> Self {
        QueryParser {
            default_field: default_field.into(),
            analyzer: Arc::new(StandardAnalyzer::new()),
        }
    }

    /// Replace the analyzer used for phrase interiors.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Parse a query string. Never fails; worst case the input degrades to a
    /// single term query.
    pub fn parse(&self, input: &str) -> Box<dyn Query> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Box::new(TermQuery::new(&self.default_field, ""));
        }

        if let Some(interior) = quoted_interior(trimmed) {
            let terms = self.analyzer.analyze(interior);
            return Box::new(PhraseQuery::new(&self.default_field, terms));
        }

        if OPERATOR_PATTERN.is_match(trimmed) {
            return Box::new(self.parse_boolean(trimmed));
        }

        Box::new(TermQuery::new(&self.default_field, trimmed.to_lowercase()))
    }

    fn parse_boolean(&self, input: &str) -> BooleanQuery {
        let mut query = BooleanQuery::new();
        // The segment before the first operator has no preceding operator
        // and defaults to Should.
        let mut occur = Occur::Should;
        let mut segment_start = 0;

        for m in OPERATOR_PATTERN.captures_iter(input) {
            let whole = m.get(0).unwrap();
            let segment = &input[segment_start..whole.start()];
            self.push_segment(&mut query, segment, occur);

            occur = match m.get(1).unwrap().as_str().to_uppercase().as_str() {
                "AND" => Occur::Must,
                "NOT" => Occur::MustNot,
                _ => Occur::Should,
            };
            segment_start = whole.end();
        }
        self.push_segment(&mut query, &input[segment_start..], occur);

        query
    }

    fn push_segment(&self, query: &mut BooleanQuery, segment: &str, occur: Occur) {
        let term = segment.trim().to_lowercase();
        if term.is_empty() {
            return;
        }
        query.add_clause(BooleanClause::new(
            Box::new(TermQuery::new(&self.default_field, term)),
            occur,
        ));
    }
}

/// Returns the interior of the input if it is wrapped in a matching pair of
/// double quotes.
fn quoted_interior(input: &str) -> Option<&str> {
    if input.len() >= 2 && input.starts_with('"') && input.ends_with('"') {
        Some(&input[1..input.len() - 1])
    } else {
        None
    }
}
