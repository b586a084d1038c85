//! Index writer: turns field definitions into indexed documents and upserts
//! them into the store.

use std::sync::Arc;

use log::debug;

use crate::analysis::{Analyzer, StandardAnalyzer};
use crate::document::{Field, FieldType, IndexedDocument};
use crate::error::{CallaError, Result};
use crate::store::DocumentStore;

/// Writes documents into the store, keyed by a caller-assigned identifier.
///
/// Writing the same identifier again replaces the prior document in full;
/// there is no partial field merge. Writes to different identifiers are
/// independent; concurrent writes to the same identifier race and the last
/// one to complete wins.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use calla::document::Field;
/// use calla::store::MemoryStore;
/// use calla::writer::IndexWriter;
///
/// # async fn example() -> calla::Result<()> {
/// let store = Arc::new(MemoryStore::new());
/// let writer = IndexWriter::new(store);
///
/// writer
///     .add_document(
///         "book-42",
///         vec![
///             Field::text("title", "Rust in Action"),
///             Field::keyword("category", "books"),
///         ],
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct IndexWriter {
    store: Arc<dyn DocumentStore>,
    analyzer: Arc<dyn Analyzer>,
}

impl IndexWriter {
    /// Create a writer over the given store with the standard analyzer.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        IndexWriter {
            store,
            analyzer: Arc::new(StandardAnalyzer::new()),
        }
    }

    /// Replace the analyzer used for analyzed text fields.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Add or fully replace a document with the default boost of 1.0.
    pub async fn add_document(&self, doc_id: &str, fields: Vec<Field>) -> Result<()> {
        self.add_document_with_boost(doc_id, fields, 1.0).await
    }

    /// Add or fully replace a document with an explicit document-level boost.
    ///
    /// Fails with a validation error before any store call if `doc_id` is
    /// empty or the field names are not unique. Store faults surface
    /// verbatim and are not retried.
    pub async fn add_document_with_boost(
        &self,
        doc_id: &str,
        fields: Vec<Field>,
        boost: f32,
    ) -> Result<()> {
        if doc_id.is_empty() {
            return Err(CallaError::validation("document id must not be empty"));
        }
        let mut seen = std::collections::HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(CallaError::validation(format!(
                    "duplicate field name: {}",
                    field.name
                )));
            }
        }

        let doc = self.build_document(doc_id, &fields, boost);
        debug!(
            "upserting document {} ({} stored, {} indexed fields)",
            doc_id,
            doc.stored.len(),
            doc.terms.len()
        );
        self.store.upsert(doc_id, doc).await
    }

    /// Delete a document by identifier. Deleting an absent identifier is a
    /// no-op, not an error.
    pub async fn delete_document(&self, doc_id: &str) -> Result<()> {
        debug!("deleting document {doc_id}");
        self.store.delete(doc_id).await
    }

    /// No-op hook retained for API symmetry with batching writers; the store
    /// is assumed immediately consistent per write.
    pub async fn commit(&self) -> Result<()> {
        Ok(())
    }

    fn build_document(&self, doc_id: &str, fields: &[Field], boost: f32) -> IndexedDocument {
        let mut doc = IndexedDocument::new(doc_id);
        doc.boost = boost;

        for field in fields {
            if field.stored {
                doc.stored.insert(field.name.clone(), field.value.clone());
            }
            if field.indexed {
                let terms = if field.field_type == FieldType::Text && field.analyzed {
                    self.analyzer.analyze(&field.value.to_canonical_string())
                } else {
                    // Non-analyzed indexed fields keep a single term in the
                    // value's string form, case preserved.
                    vec![field.value.to_canonical_string()]
                };
                doc.terms.insert(field.name.clone(), terms);
            }
        }

        doc
    }
}
