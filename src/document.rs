//! The document model: write-time field definitions and the persisted
//! indexed representation.
//!
//! A caller describes one source record as a set of [`Field`] definitions.
//! The index writer turns those into an [`IndexedDocument`]: stored field
//! values plus, per indexed field, the term list produced by the analyzer.
//!
//! # Example
//!
//! ```
//! use calla::document::Field;
//!
//! let fields = vec![
//!     Field::text("title", "Rust in Action"),
//!     Field::keyword("category", "books"),
//!     Field::integer("year", 2021).stored(true).indexed(true),
//!     Field::float("price", 39.99).indexed(false),
//! ];
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The type of a field, controlling how its value is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Free text, analyzable into terms.
    Text,
    /// An exact-match string, never analyzed.
    Keyword,
    /// A 64-bit signed integer.
    Integer,
    /// A 64-bit float.
    Float,
    /// A UTC timestamp.
    Date,
    /// A boolean flag.
    Boolean,
}

/// A field value, either supplied at write time or stored in an
/// [`IndexedDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Free text content.
    Text(String),
    /// Exact-match string content.
    Keyword(String),
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit float.
    Float(f64),
    /// UTC timestamp.
    Date(DateTime<Utc>),
    /// Boolean flag.
    Boolean(bool),
}

impl FieldValue {
    /// Returns the string content if this is a Text or Keyword variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Keyword(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value if this is an Integer variant.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float value if this is a Float variant.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean value if this is a Boolean variant.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the datetime value if this is a Date variant.
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Date(dt) => Some(*dt),
            _ => None,
        }
    }

    /// The canonical string form of this value, used for non-analyzed term
    /// lists and facet grouping. Case is preserved for strings; dates render
    /// as RFC 3339.
    pub fn to_canonical_string(&self) -> String {
        match self {
            FieldValue::Text(s) | FieldValue::Keyword(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Date(dt) => dt.to_rfc3339(),
            FieldValue::Boolean(b) => b.to_string(),
        }
    }

    /// Compare two values of the same kind, used by range predicates.
    ///
    /// Integer and Float compare numerically across kinds; strings compare
    /// lexicographically. Returns `None` for incomparable kinds.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Text(a) | FieldValue::Keyword(a), FieldValue::Text(b) | FieldValue::Keyword(b)) => {
                Some(a.cmp(b))
            }
            (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a.cmp(b)),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.partial_cmp(b),
            (FieldValue::Integer(a), FieldValue::Float(b)) => (*a as f64).partial_cmp(b),
            (FieldValue::Float(a), FieldValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (FieldValue::Date(a), FieldValue::Date(b)) => Some(a.cmp(b)),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Boolean(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::Date(v)
    }
}

/// A write-time field definition: a named value plus indexing options.
///
/// A field can be indexed without being stored and stored without being
/// indexed. `analyzed` is only meaningful for indexed Text fields.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field name, unique within a document.
    pub name: String,
    /// The field value.
    pub value: FieldValue,
    /// The field type.
    pub field_type: FieldType,
    /// Whether the value is kept retrievable in search results.
    pub stored: bool,
    /// Whether the field participates in term matching.
    pub indexed: bool,
    /// Whether an indexed Text value is run through the analyzer.
    pub analyzed: bool,
    /// Scoring boost for this field. Accepted for API compatibility; the
    /// default scorer is document-level only.
    pub boost: f32,
}

impl Field {
    fn new(name: impl Into<String>, value: FieldValue, field_type: FieldType, analyzed: bool) -> Self {
        Field {
            name: name.into(),
            value,
            field_type,
            stored: true,
            indexed: true,
            analyzed,
            boost: 1.0,
        }
    }

    /// Create an analyzed text field (stored and indexed by default).
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Field::new(name, FieldValue::Text(value.into()), FieldType::Text, true)
    }

    /// Create an exact-match keyword field.
    pub fn keyword(name: impl Into<String>, value: impl Into<String>) -> Self {
        Field::new(
            name,
            FieldValue::Keyword(value.into()),
            FieldType::Keyword,
            false,
        )
    }

    /// Create an integer field.
    pub fn integer(name: impl Into<String>, value: i64) -> Self {
        Field::new(name, FieldValue::Integer(value), FieldType::Integer, false)
    }

    /// Create a float field.
    pub fn float(name: impl Into<String>, value: f64) -> Self {
        Field::new(name, FieldValue::Float(value), FieldType::Float, false)
    }

    /// Create a date field.
    pub fn date(name: impl Into<String>, value: DateTime<Utc>) -> Self {
        Field::new(name, FieldValue::Date(value), FieldType::Date, false)
    }

    /// Create a boolean field.
    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Field::new(name, FieldValue::Boolean(value), FieldType::Boolean, false)
    }

    /// Set whether the value is stored.
    pub fn stored(mut self, stored: bool) -> Self {
        self.stored = stored;
        self
    }

    /// Set whether the field is indexed.
    pub fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    /// Set whether an indexed Text value is analyzed.
    pub fn analyzed(mut self, analyzed: bool) -> Self {
        self.analyzed = analyzed;
        self
    }

    /// Set the field boost.
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

/// The persisted representation of one source record.
///
/// Exactly one `IndexedDocument` exists per key at any time; writing again
/// with the same key replaces the prior document in full. Documents are never
/// mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedDocument {
    /// Caller-assigned, externally meaningful identifier.
    pub key: String,
    /// Stored values, populated only for fields marked stored.
    pub stored: HashMap<String, FieldValue>,
    /// Per-field term lists, populated for every indexed field.
    pub terms: HashMap<String, Vec<String>>,
    /// When this document was indexed.
    pub indexed_at: DateTime<Utc>,
    /// Document-level scoring boost.
    pub boost: f32,
}

impl IndexedDocument {
    /// Create an empty document for the given key, indexed now.
    pub fn new(key: impl Into<String>) -> Self {
        IndexedDocument {
            key: key.into(),
            stored: HashMap::new(),
            terms: HashMap::new(),
            indexed_at: Utc::now(),
            boost: 1.0,
        }
    }

    /// Get the stored value for a field, if any.
    pub fn stored_value(&self, field: &str) -> Option<&FieldValue> {
        self.stored.get(field)
    }

    /// Get the term list for a field, if the field was indexed.
    pub fn term_list(&self, field: &str) -> Option<&[String]> {
        self.terms.get(field).map(|t| t.as_slice())
    }
}
