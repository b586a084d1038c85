//! # Calla
//!
//! A small document indexing and search library with pluggable storage.
//!
//! ## Features
//!
//! - Text analysis into per-document term lists
//! - Term, phrase, boolean, range, and wildcard queries
//! - Best-effort query-string parsing
//! - Ranked, paginated results with faceted counts
//! - Async document store boundary with an in-memory reference backend

pub mod analysis;
pub mod document;
mod error;
pub mod query;
pub mod scoring;
pub mod searcher;
pub mod store;
pub mod writer;

// Re-exports for the public API
pub use analysis::{Analyzer, KeywordAnalyzer, StandardAnalyzer};
pub use document::{Field, FieldType, FieldValue, IndexedDocument};
pub use error::{CallaError, Result};
pub use query::{
    BooleanClause, BooleanQuery, BooleanQueryBuilder, Filter, Occur, PhraseQuery, Query,
    QueryParser, RangeQuery, TermQuery, WildcardQuery,
};
pub use scoring::{BoostScorer, Scorer};
pub use searcher::{FacetRequest, IndexSearcher, SearchHit, SearchRequest, SearchResults};
pub use store::{DocumentStore, FacetEntry, MemoryStore, SortField, SortOrder};
pub use writer::IndexWriter;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
