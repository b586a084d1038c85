//! The filter predicate language evaluated by the document store.
//!
//! Queries compile to this IR; a store backend either evaluates it directly
//! (as [`MemoryStore`](crate::store::memory::MemoryStore) does via
//! [`Filter::matches`]) or translates it into its own query language.
//!
//! Matching is per-document: each document carries its own term lists, so a
//! term lookup is "does this document's list for the field contain the term",
//! not a postings-list traversal. Simpler, and it leans on the store for
//! efficiency at scale.

use std::cmp::Ordering;
use std::sync::Arc;

use regex::Regex;

use crate::document::{FieldValue, IndexedDocument};

/// A filter predicate over a document's term lists and stored values.
#[derive(Debug, Clone)]
pub enum Filter {
    /// Matches every document.
    All,
    /// The term list for `field` contains `term` (case-sensitive).
    TermContains {
        /// Field whose term list is tested.
        field: String,
        /// The term to look for.
        term: String,
    },
    /// The stored value for `field` contains `needle` as a case-insensitive
    /// substring.
    StoredContains {
        /// Field whose stored value is tested.
        field: String,
        /// Substring to look for, lower-cased at construction.
        needle: String,
    },
    /// The stored value for `field` falls within the given bounds. Either
    /// bound may be absent for an open range.
    StoredInRange {
        /// Field whose stored value is tested.
        field: String,
        /// Lower bound, if any.
        lower: Option<FieldValue>,
        /// Upper bound, if any.
        upper: Option<FieldValue>,
        /// Whether the lower bound itself matches.
        include_lower: bool,
        /// Whether the upper bound itself matches.
        include_upper: bool,
    },
    /// The stored value's string form for `field` matches an anchored,
    /// case-insensitive pattern.
    StoredMatches {
        /// Field whose stored value is tested.
        field: String,
        /// Compiled pattern. `Regex::as_str` yields the source for store
        /// backends that translate rather than evaluate.
        regex: Arc<Regex>,
    },
    /// All sub-filters match. An empty list matches everything.
    And(Vec<Filter>),
    /// At least one sub-filter matches. An empty list matches nothing.
    Or(Vec<Filter>),
    /// The sub-filter does not match.
    Not(Box<Filter>),
}

impl Filter {
    /// Evaluate this filter against a single document.
    pub fn matches(&self, doc: &IndexedDocument) -> bool {
        match self {
            Filter::All => true,
            Filter::TermContains { field, term } => doc
                .term_list(field)
                .is_some_and(|terms| terms.iter().any(|t| t == term)),
            Filter::StoredContains { field, needle } => doc
                .stored_value(field)
                .is_some_and(|v| v.to_canonical_string().to_lowercase().contains(needle)),
            Filter::StoredInRange {
                field,
                lower,
                upper,
                include_lower,
                include_upper,
            } => doc.stored_value(field).is_some_and(|v| {
                in_range(v, lower.as_ref(), upper.as_ref(), *include_lower, *include_upper)
            }),
            Filter::StoredMatches { field, regex } => doc
                .stored_value(field)
                .is_some_and(|v| regex.is_match(&v.to_canonical_string())),
            Filter::And(filters) => filters.iter().all(|f| f.matches(doc)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(doc)),
            Filter::Not(filter) => !filter.matches(doc),
        }
    }
}

fn in_range(
    value: &FieldValue,
    lower: Option<&FieldValue>,
    upper: Option<&FieldValue>,
    include_lower: bool,
    include_upper: bool,
) -> bool {
    if let Some(lower) = lower {
        match value.compare(lower) {
            Some(Ordering::Greater) => {}
            Some(Ordering::Equal) if include_lower => {}
            _ => return false,
        }
    }
    if let Some(upper) = upper {
        match value.compare(upper) {
            Some(Ordering::Less) => {}
            Some(Ordering::Equal) if include_upper => {}
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_tags(key: &str, tags: &[&str]) -> IndexedDocument {
        let mut doc = IndexedDocument::new(key);
        doc.terms.insert(
            "tags".to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        );
        doc
    }

    #[test]
    fn test_all_matches_everything() {
        let doc = IndexedDocument::new("d1");
        assert!(Filter::All.matches(&doc));
    }

    #[test]
    fn test_term_contains() {
        let doc = doc_with_tags("d1", &["x", "y"]);

        let f = Filter::TermContains {
            field: "tags".into(),
            term: "x".into(),
        };
        assert!(f.matches(&doc));

        let f = Filter::TermContains {
            field: "tags".into(),
            term: "z".into(),
        };
        assert!(!f.matches(&doc));

        // Case-sensitive.
        let f = Filter::TermContains {
            field: "tags".into(),
            term: "X".into(),
        };
        assert!(!f.matches(&doc));
    }

    #[test]
    fn test_stored_contains_case_insensitive() {
        let mut doc = IndexedDocument::new("d1");
        doc.stored.insert(
            "title".into(),
            FieldValue::Text("Rust in Action".into()),
        );

        let f = Filter::StoredContains {
            field: "title".into(),
            needle: "rust in".into(),
        };
        assert!(f.matches(&doc));

        let f = Filter::StoredContains {
            field: "title".into(),
            needle: "python".into(),
        };
        assert!(!f.matches(&doc));
    }

    #[test]
    fn test_stored_in_range_bounds() {
        let mut doc = IndexedDocument::new("d1");
        doc.stored.insert("year".into(), FieldValue::Integer(2020));

        let range = |lower: Option<i64>, upper: Option<i64>, il: bool, iu: bool| {
            Filter::StoredInRange {
                field: "year".into(),
                lower: lower.map(FieldValue::Integer),
                upper: upper.map(FieldValue::Integer),
                include_lower: il,
                include_upper: iu,
            }
        };

        assert!(range(Some(2010), Some(2030), true, true).matches(&doc));
        assert!(range(Some(2020), None, true, true).matches(&doc));
        assert!(!range(Some(2020), None, false, true).matches(&doc));
        assert!(range(None, Some(2020), true, true).matches(&doc));
        assert!(!range(None, Some(2020), true, false).matches(&doc));
        assert!(!range(Some(2021), None, true, true).matches(&doc));
    }

    #[test]
    fn test_range_missing_field_never_matches() {
        let doc = IndexedDocument::new("d1");
        let f = Filter::StoredInRange {
            field: "year".into(),
            lower: None,
            upper: None,
            include_lower: true,
            include_upper: true,
        };
        assert!(!f.matches(&doc));
    }

    #[test]
    fn test_boolean_combinators() {
        let doc = doc_with_tags("d1", &["x", "y"]);
        let has = |t: &str| Filter::TermContains {
            field: "tags".into(),
            term: t.into(),
        };

        assert!(Filter::And(vec![has("x"), has("y")]).matches(&doc));
        assert!(!Filter::And(vec![has("x"), has("z")]).matches(&doc));
        assert!(Filter::Or(vec![has("z"), has("y")]).matches(&doc));
        assert!(!Filter::Or(vec![]).matches(&doc));
        assert!(Filter::And(vec![]).matches(&doc));
        assert!(Filter::Not(Box::new(has("z"))).matches(&doc));
    }

    #[test]
    fn test_stored_matches_regex() {
        let mut doc = IndexedDocument::new("d1");
        doc.stored
            .insert("name".into(), FieldValue::Keyword("Backend".into()));

        let f = Filter::StoredMatches {
            field: "name".into(),
            regex: Arc::new(Regex::new("(?i)^back.*$").unwrap()),
        };
        assert!(f.matches(&doc));
    }
}
