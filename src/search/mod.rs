//! Search service: turns a [`SearchQuery`] into a result envelope.
//!
//! Sits between the HTTP/MCP handlers and the repository. Owns the
//! related-content fallback and the pagination metadata; the repository
//! only knows about rows.

use thiserror::Error;

use crate::models::{Pagination, SearchQuery, SearchResults, PAGE_SIZE};
use crate::repository::ContentRepository;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// Stateless search front-end over the repository.
#[derive(Clone)]
pub struct SearchService {
    repo: ContentRepository,
}

impl SearchService {
    pub fn new(repo: ContentRepository) -> Self {
        Self { repo }
    }

    /// Execute a search.
    ///
    /// An empty query short-circuits to an empty envelope without touching
    /// the database. When the query matches nothing, recent items passing
    /// the same type filter are returned instead, flagged low-relevance,
    /// so the results page is never blank while the library has content.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResults, SearchError> {
        if query.is_empty() {
            return Ok(SearchResults::empty(query.text.clone()));
        }

        let (items, total) = self.repo.search(query).await?;
        if total > 0 {
            let mut results = SearchResults::partition(&query.text, &items, total, false);
            results.pagination = Some(Pagination::new(query.page, total));
            return Ok(results);
        }

        let related = self.repo.recent(query.filter, PAGE_SIZE).await?;
        if related.is_empty() {
            return Ok(SearchResults::empty(&query.text));
        }

        let related_total = related.len() as u64;
        let mut results = SearchResults::partition(&query.text, &related, related_total, true);
        results.pagination = Some(Pagination::new(1, related_total));
        Ok(results)
    }
}
