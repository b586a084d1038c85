//! Wildcard query for pattern matching over stored values.

use std::sync::Arc;

use regex::Regex;

use crate::error::{CallaError, Result};
use crate::query::filter::Filter;
use crate::query::Query;

/// A query that matches documents whose stored value for a field matches a
/// wildcard pattern, case-insensitively.
///
/// Supports the following wildcards:
/// - `*` matches zero or more characters
/// - `?` matches exactly one character
/// - `\*` and `\?` match literal `*` and `?` characters
#[derive(Debug, Clone)]
pub struct WildcardQuery {
    field: String,
    pattern: String,
    regex: Arc<Regex>,
    boost: f32,
}

impl WildcardQuery {
    /// Create a new wildcard query.
    pub fn new(field: impl Into<String>, pattern: impl Into<String>) -> Result<Self> {
        let field = field.into();
        let pattern = pattern.into();
        let regex_pattern = Self::compile_pattern(&pattern);
        let regex = Regex::new(&regex_pattern)
            .map_err(|e| CallaError::analysis(format!("invalid wildcard pattern: {e}")))?;

        Ok(WildcardQuery {
            field,
            pattern,
            regex: Arc::new(regex),
            boost: 1.0,
        })
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

    /// Get the wildcard pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Compile a wildcard pattern into an anchored, case-insensitive regex
    /// source string.
    fn compile_pattern(pattern: &str) -> String {
        let mut regex_pattern = String::from("(?i)^");

        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '\\' if i + 1 < chars.len() => {
                    // Escaped wildcard characters match literally.
                    regex_pattern.push_str(&regex::escape(&chars[i + 1].to_string()));
                    i += 1;
                }
                '*' => regex_pattern.push_str(".*"),
                '?' => regex_pattern.push('.'),
                c => regex_pattern.push_str(&regex::escape(&c.to_string())),
            }
            i += 1;
        }

        regex_pattern.push('$');
        regex_pattern
    }
}

impl Query for WildcardQuery {
    fn filter(&self) -> Result<Filter> {
        Ok(Filter::StoredMatches {
            field: self.field.clone(),
            regex: self.regex.clone(),
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
            format!("{}:{}", self.field, self.pattern)
        } else {
            format!("{}:{}^{}", self.field, self.pattern, self.boost)
        }
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{FieldValue, IndexedDocument};

    fn doc_with_name(name: &str) -> IndexedDocument {
        let mut doc = IndexedDocument::new("d1");
        doc.stored
            .insert("name".into(), FieldValue::Keyword(name.into()));
        doc
    }

    #[test]
    fn test_star_matches_any_run() {
        let query = WildcardQuery::new("name", "back*").unwrap();
        let filter = query.filter().unwrap();

        assert!(filter.matches(&doc_with_name("backend")));
        assert!(filter.matches(&doc_with_name("Backup")));
        assert!(!filter.matches(&doc_with_name("frontend")));
    }

    #[test]
    fn test_question_mark_matches_one_char() {
        let query = WildcardQuery::new("name", "r?st").unwrap();
        let filter = query.filter().unwrap();

        assert!(filter.matches(&doc_with_name("rust")));
        assert!(filter.matches(&doc_with_name("rest")));
        assert!(!filter.matches(&doc_with_name("roast")));
    }

    #[test]
    fn test_pattern_is_anchored() {
        let query = WildcardQuery::new("name", "end").unwrap();
        let filter = query.filter().unwrap();

        assert!(!filter.matches(&doc_with_name("backend")));
        assert!(filter.matches(&doc_with_name("End")));
    }

    #[test]
    fn test_escaped_wildcards_match_literally() {
        let query = WildcardQuery::new("name", r"a\*b").unwrap();
        let filter = query.filter().unwrap();

        assert!(filter.matches(&doc_with_name("a*b")));
        assert!(!filter.matches(&doc_with_name("axb")));
    }

    #[test]
    fn test_regex_metacharacters_are_escaped() {
        let query = WildcardQuery::new("name", "a.b").unwrap();
        let filter = query.filter().unwrap();

        assert!(filter.matches(&doc_with_name("a.b")));
        assert!(!filter.matches(&doc_with_name("axb")));
    }
}
