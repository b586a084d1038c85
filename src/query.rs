//! Query model: a closed set of query node types, each compiling itself into
//! a store filter predicate.
//!
//! Queries are trait objects implementing [`Query`]. Every node carries a
//! boost used only at scoring time, never at predicate-compile time.
//!
//! # Example
//!
//! ```
//! use calla::query::{BooleanQueryBuilder, Query, TermQuery};
//!
//! let query = BooleanQueryBuilder::new()
//!     .must(Box::new(TermQuery::new("tags", "rust")))
//!     .must_not(Box::new(TermQuery::new("tags", "draft")))
//!     .build();
//! assert_eq!(query.description(), "(+tags:rust -tags:draft)");
//! ```

pub mod boolean;
pub mod filter;
pub mod parser;
pub mod phrase;
pub mod range;
pub mod term;
pub mod wildcard;

use std::fmt::Debug;

use crate::error::Result;

pub use boolean::{BooleanClause, BooleanQuery, BooleanQueryBuilder, Occur};
pub use filter::Filter;
pub use parser::QueryParser;
pub use phrase::PhraseQuery;
pub use range::RangeQuery;
pub use term::TermQuery;
pub use wildcard::WildcardQuery;

/// Trait for query nodes.
///
/// A query compiles itself into a [`Filter`] predicate that the document
/// store evaluates. Boosts are a scoring-time concern only.
pub trait Query: Send + Sync + Debug {
    /// Compile this query into a store filter predicate.
    fn filter(&self) -> Result<Filter>;

    /// Get the boost factor for this query.
    fn boost(&self) -> f32;

    /// Set the boost factor for this query.
    fn set_boost(&mut self, boost: f32);

    /// A human-readable description of this query, for logging and tests.
    fn description(&self) -> String;

    /// Clone this query into a new boxed trait object.
    fn clone_box(&self) -> Box<dyn Query>;
}

impl Clone for Box<dyn Query> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
