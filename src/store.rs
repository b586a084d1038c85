//! The document store boundary.
//!
//! The store is the single source of truth and the only collaborator this
//! library depends on: a generic document store that can upsert or delete a
//! document by key and evaluate [`Filter`](crate::query::Filter) predicates
//! with skip/limit/sort and grouped counts.
//!
//! All store operations are I/O-bound and asynchronous. The library performs
//! no retries, backoff, or circuit breaking at this boundary; that belongs to
//! the store client or a surrounding resilience layer. Callers impose
//! timeouts at the store-call boundary if they need them.

pub mod memory;

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::IndexedDocument;
use crate::error::Result;
use crate::query::filter::Filter;

pub use memory::MemoryStore;

/// Sort direction for store queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Ascending order (lowest to highest).
    #[default]
    Asc,
    /// Descending order (highest to lowest).
    Desc,
}

/// A stored field to order results by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Stored field name to sort by.
    pub field: String,
    /// Sort direction.
    pub order: SortOrder,
}

impl SortField {
    /// Sort ascending by a stored field.
    pub fn asc(field: impl Into<String>) -> Self {
        SortField {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    /// Sort descending by a stored field.
    pub fn desc(field: impl Into<String>) -> Self {
        SortField {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

/// One grouped-count entry: a distinct field value and how many matching
/// documents carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetEntry {
    /// The distinct value, in its canonical string form.
    pub value: String,
    /// Number of matching documents with this value.
    pub count: u64,
}

/// Trait for document store backends.
///
/// Implementations either evaluate [`Filter`] predicates directly or
/// translate them into their own query language. The key must be unique:
/// `upsert` replaces any existing document with the same key in full.
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug {
    /// Insert or fully replace the document stored under `key`.
    async fn upsert(&self, key: &str, doc: IndexedDocument) -> Result<()>;

    /// Remove the document stored under `key`. Removing an absent key is a
    /// no-op, not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Count the documents matching `filter`.
    async fn count(&self, filter: &Filter) -> Result<u64>;

    /// Fetch up to `limit` matching documents starting at offset `skip`,
    /// ordered by `sort` if non-empty, else in store order.
    async fn find(
        &self,
        filter: &Filter,
        skip: usize,
        limit: usize,
        sort: &[SortField],
    ) -> Result<Vec<IndexedDocument>>;

    /// Group matching documents by their stored value for `field` and return
    /// the top `max_count` values by descending count. Tie order between
    /// equal counts is unspecified.
    async fn group_count(
        &self,
        filter: &Filter,
        field: &str,
        max_count: usize,
    ) -> Result<Vec<FacetEntry>>;
}
