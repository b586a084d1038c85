//! Text analysis: turning free text into normalized term sequences.
//!
//! An [`Analyzer`] is a pure function from text to an ordered list of terms.
//! The [`StandardAnalyzer`] lower-cases its input, extracts runs of word
//! characters, and drops short tokens and stop words. The
//! [`KeywordAnalyzer`] passes its input through as a single term.
//!
//! # Example
//!
//! ```
//! use calla::analysis::{Analyzer, StandardAnalyzer};
//!
//! let analyzer = StandardAnalyzer::new();
//! let terms = analyzer.analyze("The Quick Brown Fox");
//! assert_eq!(terms, vec!["quick", "brown", "fox"]);
//! ```

use std::collections::HashSet;
use std::fmt::Debug;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD_PATTERN: Regex = Regex::new(r"\w+").unwrap();

    /// Closed stop-word list: English articles, conjunctions, and common
    /// prepositions. Not user-configurable on the default analyzer.
    static ref STOP_WORDS: HashSet<&'static str> = [
        // articles
        "a", "an", "the",
        // conjunctions
        "and", "but", "or", "nor", "for", "yet", "so",
        // common prepositions
        "of", "in", "on", "at", "to", "by", "with", "from", "as",
        "into", "onto", "upon", "over", "under", "about", "above",
        "after", "before", "between", "during", "through", "within",
        "without",
    ]
    .into_iter()
    .collect();
}

/// Minimum term length retained by the standard analyzer. Tokens of this
/// length or shorter are discarded.
const MIN_TERM_LEN: usize = 3;

/// Trait for text analyzers.
///
/// Implementations must be deterministic and side-effect free. Empty input
/// yields an empty sequence, never an error.
pub trait Analyzer: Send + Sync + Debug {
    /// Analyze the given text into an ordered sequence of terms.
    fn analyze(&self, text: &str) -> Vec<String>;
}

/// The default analyzer: lower-case, word-character tokenization, short-token
/// and stop-word removal.
#[derive(Debug, Clone, Default)]
pub struct StandardAnalyzer;

impl StandardAnalyzer {
    /// Create a new standard analyzer.
    pub fn new() -> Self {
        StandardAnalyzer
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        WORD_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| t.chars().count() >= MIN_TERM_LEN)
            .filter(|t| !STOP_WORDS.contains(t))
            .map(|t| t.to_string())
            .collect()
    }
}

/// An analyzer that emits the trimmed input as a single term, case preserved.
///
/// Useful for keyword-style fields where callers want an analyzer-shaped
/// pass-through. Blank input yields no terms.
#[derive(Debug, Clone, Default)]
pub struct KeywordAnalyzer;

impl KeywordAnalyzer {
    /// Create a new keyword analyzer.
    pub fn new() -> Self {
        KeywordAnalyzer
    }
}

impl Analyzer for KeywordAnalyzer {
    fn analyze(&self, text: &str) -> Vec<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_analyzer_basic() {
        let analyzer = StandardAnalyzer::new();
        let terms = analyzer.analyze("Hello World");
        assert_eq!(terms, vec!["hello", "world"]);
    }

    #[test]
    fn test_standard_analyzer_stop_words() {
        let analyzer = StandardAnalyzer::new();
        let terms = analyzer.analyze("The quick fox and the lazy dog");
        assert_eq!(terms, vec!["quick", "fox", "lazy", "dog"]);
    }

    #[test]
    fn test_standard_analyzer_short_tokens() {
        let analyzer = StandardAnalyzer::new();
        // Every token is either a stop word or two characters or fewer;
        // "ok" falls to the length filter.
        let terms = analyzer.analyze("a an it is ok");
        assert!(terms.is_empty());
    }

    #[test]
    fn test_standard_analyzer_empty_input() {
        let analyzer = StandardAnalyzer::new();
        assert!(analyzer.analyze("").is_empty());
        assert!(analyzer.analyze("   \t\n").is_empty());
    }

    #[test]
    fn test_standard_analyzer_punctuation_and_digits() {
        let analyzer = StandardAnalyzer::new();
        let terms = analyzer.analyze("rust-lang 2024, async/await!");
        assert_eq!(terms, vec!["rust", "lang", "2024", "async", "await"]);
    }

    #[test]
    fn test_standard_analyzer_underscore_run() {
        let analyzer = StandardAnalyzer::new();
        // Underscores are word characters, so snake_case stays one term.
        let terms = analyzer.analyze("parse_query input");
        assert_eq!(terms, vec!["parse_query", "input"]);
    }

    #[test]
    fn test_keyword_analyzer() {
        let analyzer = KeywordAnalyzer::new();
        assert_eq!(
            analyzer.analyze("  New York  "),
            vec!["New York".to_string()]
        );
        assert!(analyzer.analyze("   ").is_empty());
    }

    #[test]
    fn test_analyzer_deterministic() {
        let analyzer = StandardAnalyzer::new();
        let a = analyzer.analyze("Determinism matters here");
        let b = analyzer.analyze("Determinism matters here");
        assert_eq!(a, b);
    }
}
