//! Boolean query for combining multiple queries.

use crate::error::Result;
use crate::query::filter::Filter;
use crate::query::Query;

/// Occurrence requirements for boolean clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    /// The clause must match (AND).
    Must,
    /// The clause should match (OR).
    Should,
    /// The clause must not match (AND NOT).
    MustNot,
}

/// A clause in a boolean query.
#[derive(Debug)]
pub struct BooleanClause {
    /// The query for this clause.
    pub query: Box<dyn Query>,
    /// The occurrence requirement.
    pub occur: Occur,
}

impl Clone for BooleanClause {
    fn clone(&self) -> Self {
        BooleanClause {
            query: self.query.clone_box(),
            occur: self.occur,
        }
    }
}

impl BooleanClause {
    /// Create a new boolean clause.
    pub fn new(query: Box<dyn Query>, occur: Occur) -> Self {
        BooleanClause { query, occur }
    }

    /// Create a MUST clause.
    pub fn must(query: Box<dyn Query>) -> Self {
        BooleanClause::new(query, Occur::Must)
    }

    /// Create a SHOULD clause.
    pub fn should(query: Box<dyn Query>) -> Self {
        BooleanClause::new(query, Occur::Should)
    }

    /// Create a MUST_NOT clause.
    pub fn must_not(query: Box<dyn Query>) -> Self {
        BooleanClause::new(query, Occur::MustNot)
    }
}

/// A query combining sub-queries with boolean logic.
///
/// All Must predicates are AND-ed; Should predicates are OR-ed together and
/// the group AND-ed with the Must group; MustNot predicates are OR-ed,
/// negated, and AND-ed in. An empty clause list compiles to an always-true
/// predicate. If only Should clauses are present, at least one must match.
///
/// Clauses are appended before first use; the query is not mutated after
/// compilation.
#[derive(Debug, Clone)]
pub struct BooleanQuery {
    clauses: Vec<BooleanClause>,
    boost: f32,
}

impl BooleanQuery {
    /// Create a new empty boolean query.
    pub fn new() -> Self {
        BooleanQuery {
            clauses: Vec::new(),
            boost: 1.0,
        }
    }

    /// Add a clause to this boolean query.
    pub fn add_clause(&mut self, clause: BooleanClause) {
        self.clauses.push(clause);
    }

    /// Add a MUST clause.
    pub fn add_must(&mut self, query: Box<dyn Query>) {
        self.add_clause(BooleanClause::must(query));
    }

    /// Add a SHOULD clause.
    pub fn add_should(&mut self, query: Box<dyn Query>) {
        self.add_clause(BooleanClause::should(query));
    }

    /// Add a MUST_NOT clause.
    pub fn add_must_not(&mut self, query: Box<dyn Query>) {
        self.add_clause(BooleanClause::must_not(query));
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the clauses.
    pub fn clauses(&self) -> &[BooleanClause] {
        &self.clauses
    }

    /// Check if this query has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Get clauses by occurrence type.
    pub fn clauses_by_occur(&self, occur: Occur) -> Vec<&BooleanClause> {
        self.clauses.iter().filter(|c| c.occur == occur).collect()
    }
}

impl Default for BooleanQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Query for BooleanQuery {
    fn filter(&self) -> Result<Filter> {
        if self.clauses.is_empty() {
            return Ok(Filter::All);
        }

        let mut groups: Vec<Filter> = Vec::new();

        let must: Vec<Filter> = self
            .clauses_by_occur(Occur::Must)
            .iter()
            .map(|c| c.query.filter())
            .collect::<Result<_>>()?;
        if !must.is_empty() {
            groups.push(Filter::And(must));
        }

        let should: Vec<Filter> = self
            .clauses_by_occur(Occur::Should)
            .iter()
            .map(|c| c.query.filter())
            .collect::<Result<_>>()?;
        if !should.is_empty() {
            groups.push(Filter::Or(should));
        }

        let must_not: Vec<Filter> = self
            .clauses_by_occur(Occur::MustNot)
            .iter()
            .map(|c| c.query.filter())
            .collect::<Result<_>>()?;
        if !must_not.is_empty() {
            groups.push(Filter::Not(Box::new(Filter::Or(must_not))));
        }

        Ok(Filter::And(groups))
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        if self.clauses.is_empty() {
            return "()".to_string();
        }

        let parts: Vec<String> = self
            .clauses
            .iter()
            .map(|clause| match clause.occur {
                Occur::Must => format!("+{}", clause.query.description()),
                Occur::Should => clause.query.description(),
                Occur::MustNot => format!("-{}", clause.query.description()),
            })
            .collect();

        let result = format!("({})", parts.join(" "));
        if self.boost == 1.0 {
            result
        } else {
            format!("{}^{}", result, self.boost)
        }
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}

/// Builder for creating boolean queries.
#[derive(Debug, Default)]
pub struct BooleanQueryBuilder {
    query: BooleanQuery,
}

impl BooleanQueryBuilder {
    /// Create a new boolean query builder.
    pub fn new() -> Self {
        BooleanQueryBuilder {
            query: BooleanQuery::new(),
        }
    }

    /// Add a MUST clause.
    pub fn must(mut self, query: Box<dyn Query>) -> Self {
        self.query.add_must(query);
        self
    }

    /// Add a SHOULD clause.
    pub fn should(mut self, query: Box<dyn Query>) -> Self {
        self.query.add_should(query);
        self
    }

    /// Add a MUST_NOT clause.
    pub fn must_not(mut self, query: Box<dyn Query>) -> Self {
        self.query.add_must_not(query);
        self
    }

    /// Set the boost factor.
    pub fn boost(mut self, boost: f32) -> Self {
        self.query = self.query.with_boost(boost);
        self
    }

    /// Build the boolean query.
    pub fn build(self) -> BooleanQuery {
        self.query
    }
}
