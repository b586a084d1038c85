//! In-memory document store backend.
//!
//! The reference [`DocumentStore`] implementation: a lock-guarded map keyed
//! by document identifier, evaluating filters document by document. Suitable
//! for tests and small collections; a production deployment would put a real
//! document database behind the same trait.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::document::IndexedDocument;
use crate::error::Result;
use crate::query::filter::Filter;
use crate::store::{DocumentStore, FacetEntry, SortField, SortOrder};

/// An in-memory store over a lock-guarded ordered map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<BTreeMap<String, IndexedDocument>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        MemoryStore {
            docs: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of documents currently held, regardless of any filter.
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    /// Fetch a document by key, if present.
    pub fn get(&self, key: &str) -> Option<IndexedDocument> {
        self.docs.read().get(key).cloned()
    }
}

fn compare_by_sort_fields(a: &IndexedDocument, b: &IndexedDocument, sort: &[SortField]) -> Ordering {
    for sf in sort {
        let av = a.stored_value(&sf.field);
        let bv = b.stored_value(&sf.field);
        let ord = match (av, bv) {
            (Some(av), Some(bv)) => av.compare(bv).unwrap_or(Ordering::Equal),
            // Documents missing the sort field order after those that have it.
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        let ord = match sf.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn upsert(&self, key: &str, doc: IndexedDocument) -> Result<()> {
        self.docs.write().insert(key.to_string(), doc);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.docs.write().remove(key);
        Ok(())
    }

    async fn count(&self, filter: &Filter) -> Result<u64> {
        let docs = self.docs.read();
        Ok(docs.values().filter(|d| filter.matches(d)).count() as u64)
    }

    async fn find(
        &self,
        filter: &Filter,
        skip: usize,
        limit: usize,
        sort: &[SortField],
    ) -> Result<Vec<IndexedDocument>> {
        let docs = self.docs.read();
        let mut matching: Vec<IndexedDocument> = docs
            .values()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect();

        if !sort.is_empty() {
            matching.sort_by(|a, b| compare_by_sort_fields(a, b, sort));
        }

        Ok(matching.into_iter().skip(skip).take(limit).collect())
    }

    async fn group_count(
        &self,
        filter: &Filter,
        field: &str,
        max_count: usize,
    ) -> Result<Vec<FacetEntry>> {
        let docs = self.docs.read();
        let mut counts: HashMap<String, u64> = HashMap::new();

        for doc in docs.values().filter(|d| filter.matches(d)) {
            if let Some(value) = doc.stored_value(field) {
                *counts.entry(value.to_canonical_string()).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<FacetEntry> = counts
            .into_iter()
            .map(|(value, count)| FacetEntry { value, count })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(max_count);

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FieldValue;

    fn doc(key: &str, category: &str, year: i64) -> IndexedDocument {
        let mut d = IndexedDocument::new(key);
        d.stored
            .insert("category".into(), FieldValue::Keyword(category.into()));
        d.stored.insert("year".into(), FieldValue::Integer(year));
        d.terms
            .insert("category".into(), vec![category.to_string()]);
        d
    }

    #[tokio::test]
    async fn test_upsert_replaces() {
        let store = MemoryStore::new();
        store.upsert("d1", doc("d1", "books", 2020)).await.unwrap();
        store.upsert("d1", doc("d1", "music", 2021)).await.unwrap();

        assert_eq!(store.len(), 1);
        let d = store.get("d1").unwrap();
        assert_eq!(
            d.stored_value("category"),
            Some(&FieldValue::Keyword("music".into()))
        );
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let store = MemoryStore::new();
        store.delete("missing").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_count_and_find() {
        let store = MemoryStore::new();
        store.upsert("d1", doc("d1", "books", 2019)).await.unwrap();
        store.upsert("d2", doc("d2", "books", 2021)).await.unwrap();
        store.upsert("d3", doc("d3", "music", 2020)).await.unwrap();

        let filter = Filter::TermContains {
            field: "category".into(),
            term: "books".into(),
        };
        assert_eq!(store.count(&filter).await.unwrap(), 2);

        let found = store.find(&filter, 0, 10, &[]).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_find_sorted_and_paginated() {
        let store = MemoryStore::new();
        store.upsert("d1", doc("d1", "books", 2019)).await.unwrap();
        store.upsert("d2", doc("d2", "books", 2021)).await.unwrap();
        store.upsert("d3", doc("d3", "books", 2020)).await.unwrap();

        let sort = vec![SortField::desc("year")];
        let found = store.find(&Filter::All, 0, 2, &sort).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].key, "d2");
        assert_eq!(found[1].key, "d3");

        let rest = store.find(&Filter::All, 2, 2, &sort).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].key, "d1");
    }

    #[tokio::test]
    async fn test_group_count_ordering() {
        let store = MemoryStore::new();
        store.upsert("d1", doc("d1", "books", 2019)).await.unwrap();
        store.upsert("d2", doc("d2", "books", 2020)).await.unwrap();
        store.upsert("d3", doc("d3", "music", 2021)).await.unwrap();

        let facets = store.group_count(&Filter::All, "category", 10).await.unwrap();
        assert_eq!(facets.len(), 2);
        // Counts are non-increasing.
        assert!(facets.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(facets[0].value, "books");
        assert_eq!(facets[0].count, 2);
    }

    #[test]
    fn test_usable_from_sync_context() {
        // The store has no runtime affinity; a plain executor drives it.
        let store = MemoryStore::new();
        tokio_test::block_on(async {
            store.upsert("d1", doc("d1", "books", 2020)).await.unwrap();
            assert_eq!(store.count(&Filter::All).await.unwrap(), 1);
        });
    }

    #[tokio::test]
    async fn test_group_count_respects_max() {
        let store = MemoryStore::new();
        store.upsert("d1", doc("d1", "a", 1)).await.unwrap();
        store.upsert("d2", doc("d2", "b", 2)).await.unwrap();
        store.upsert("d3", doc("d3", "c", 3)).await.unwrap();

        let facets = store.group_count(&Filter::All, "category", 2).await.unwrap();
        assert_eq!(facets.len(), 2);
    }
}
