//! Index searcher: compiles queries to store predicates and packages ranked,
//! paginated, optionally faceted results.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::try_join_all;
use log::debug;

use crate::document::FieldValue;
use crate::error::Result;
use crate::query::Query;
use crate::scoring::{BoostScorer, Scorer};
use crate::store::{DocumentStore, FacetEntry, SortField};

/// A facet request: group matching documents by their stored value for
/// `field` and return the top `max_count` values by descending count.
#[derive(Debug, Clone)]
pub struct FacetRequest {
    /// Stored field to group by.
    pub field: String,
    /// Maximum number of distinct values to return.
    pub max_count: usize,
}

impl FacetRequest {
    /// Create a new facet request.
    pub fn new(field: impl Into<String>, max_count: usize) -> Self {
        FacetRequest {
            field: field.into(),
            max_count,
        }
    }
}

/// A search request: the query plus pagination, sorting, and faceting.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// The query to execute.
    pub query: Box<dyn Query>,
    /// Maximum number of results to return.
    pub limit: usize,
    /// Number of results to skip before returning (for pagination).
    pub skip: usize,
    /// Stored fields to order results by. When empty, the returned page is
    /// ordered by score descending.
    pub sort: Vec<SortField>,
    /// Facet requests to evaluate alongside the search.
    pub facets: Vec<FacetRequest>,
}

impl SearchRequest {
    /// Create a new search request with the default limit of 10.
    pub fn new(query: Box<dyn Query>) -> Self {
        SearchRequest {
            query,
            limit: 10,
            skip: 0,
            sort: Vec::new(),
            facets: Vec::new(),
        }
    }

    /// Set the maximum number of results to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the number of results to skip.
    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Add a sort field. Explicit sorts replace the default ordering by
    /// score.
    pub fn sort_by(mut self, sort: SortField) -> Self {
        self.sort.push(sort);
        self
    }

    /// Add a facet request.
    pub fn facet(mut self, field: impl Into<String>, max_count: usize) -> Self {
        self.facets.push(FacetRequest::new(field, max_count));
        self
    }
}

/// One matching document in a result page.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// The document's caller-assigned identifier.
    pub key: String,
    /// Computed relevance score.
    pub score: f32,
    /// The stored field values for this document.
    pub fields: HashMap<String, FieldValue>,
}

/// A page of search results.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    /// The result page, in rank or sort order.
    pub hits: Vec<SearchHit>,
    /// Total number of matching documents, independent of pagination.
    pub total_hits: u64,
    /// Wall-clock time for the whole operation.
    pub elapsed: Duration,
    /// Facet counts per requested field, non-increasing by count.
    pub facets: HashMap<String, Vec<FacetEntry>>,
}

/// Executes queries against the store and ranks the results.
///
/// The searcher keeps no state between calls; reads may run with unbounded
/// concurrency. A search that matches nothing returns empty results, never
/// an error.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use calla::query::TermQuery;
/// use calla::searcher::{IndexSearcher, SearchRequest};
/// use calla::store::MemoryStore;
///
/// # async fn example() -> calla::Result<()> {
/// let store = Arc::new(MemoryStore::new());
/// let searcher = IndexSearcher::new(store);
///
/// let request = SearchRequest::new(Box::new(TermQuery::new("title", "rust")))
///     .limit(20)
///     .facet("category", 5);
/// let results = searcher.search(request).await?;
/// println!("{} hits in {:?}", results.total_hits, results.elapsed);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct IndexSearcher {
    store: Arc<dyn DocumentStore>,
    scorer: Arc<dyn Scorer>,
}

impl IndexSearcher {
    /// Create a searcher over the given store with the default boost scorer.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        IndexSearcher {
            store,
            scorer: Arc::new(BoostScorer::new()),
        }
    }

    /// Replace the scoring strategy.
    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Execute a search request.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResults> {
        let started = Instant::now();
        let filter = request.query.filter()?;
        debug!("searching: {}", request.query.description());

        let total_hits = self.store.count(&filter).await?;
        let docs = self
            .store
            .find(&filter, request.skip, request.limit, &request.sort)
            .await?;

        let query_boost = request.query.boost();
        let mut hits: Vec<SearchHit> = docs
            .into_iter()
            .map(|doc| {
                let score = self.scorer.score(&doc, query_boost);
                SearchHit {
                    key: doc.key,
                    score,
                    fields: doc.stored,
                }
            })
            .collect();

        // Without an explicit sort, the fetched page is ordered by score
        // descending.
        if request.sort.is_empty() {
            hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        }

        let facet_results = try_join_all(
            request
                .facets
                .iter()
                .map(|f| self.store.group_count(&filter, &f.field, f.max_count)),
        )
        .await?;
        let facets = request
            .facets
            .iter()
            .map(|f| f.field.clone())
            .zip(facet_results)
            .collect();

        Ok(SearchResults {
            hits,
            total_hits,
            elapsed: started.elapsed(),
            facets,
        })
    }
}
