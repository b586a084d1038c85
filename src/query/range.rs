//! Range query over a field's stored value.

use crate::document::FieldValue;
use crate::error::Result;
use crate::query::filter::Filter;
use crate::query::Query;

/// A query that matches documents whose stored value for a field falls
/// within the given bounds. Either bound may be omitted for an open range;
/// bounds are inclusive by default.
#[derive(Debug, Clone)]
pub struct RangeQuery {
    field: String,
    lower: Option<FieldValue>,
    upper: Option<FieldValue>,
    include_lower: bool,
    include_upper: bool,
    boost: f32,
}

impl RangeQuery {
    /// Create a new range query with inclusive bounds.
    pub fn new(
        field: impl Into<String>,
        lower: Option<FieldValue>,
        upper: Option<FieldValue>,
    ) -> Self {
        RangeQuery {
            field: field.into(),
            lower,
            upper,
            include_lower: true,
            include_upper: true,
            boost: 1.0,
        }
    }

    /// Set whether the lower bound itself matches.
    pub fn include_lower(mut self, include: bool) -> Self {
        self.include_lower = include;
        self
    }

    /// Set whether the upper bound itself matches.
    pub fn include_upper(mut self, include: bool) -> Self {
        self.include_upper = include;
        self
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
}

impl Query for RangeQuery {
    fn filter(&self) -> Result<Filter> {
        Ok(Filter::StoredInRange {
            field: self.field.clone(),
            lower: self.lower.clone(),
            upper: self.upper.clone(),
            include_lower: self.include_lower,
            include_upper: self.include_upper,
        })
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        let open = if self.include_lower { '[' } else { '{' };
        let close = if self.include_upper { ']' } else { '}' };
        let lower = self
            .lower
            .as_ref()
            .map_or("*".to_string(), |v| v.to_canonical_string());
        let upper = self
            .upper
            .as_ref()
            .map_or("*".to_string(), |v| v.to_canonical_string());
        let range = format!("{}:{}{} TO {}{}", self.field, open, lower, upper, close);
        if self.boost == 1.0 {
            range
        } else {
            format!("{}^{}", range, self.boost)
        }
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}
