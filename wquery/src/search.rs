//! Immutable search request and the vector store contract.
//!
//! ```rust
//! use wquery::SearchRequest;
//!
//! let base = SearchRequest::for_query("release notes");
//! let filtered = base.to_builder().filter("year == 2026").build();
//!
//! assert!(base.filter().is_none());
//! assert_eq!(filtered.filter(), Some("year == 2026"));
//! ```

use wcommon::BoxFuture;

use crate::{Document, QueryError};

pub const DEFAULT_TOP_K: usize = 4;

/// Query text, optional filter expression, and result cap for a vector
/// search. Values are frozen on build; derive variants through
/// [`SearchRequest::to_builder`], never in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    filter: Option<String>,
    top_k: usize,
}

impl SearchRequest {
    pub fn builder() -> SearchRequestBuilder {
        SearchRequestBuilder::default()
    }

    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            filter: None,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn to_builder(&self) -> SearchRequestBuilder {
        SearchRequestBuilder {
            query: self.query.clone(),
            filter: self.filter.clone(),
            top_k: self.top_k,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequestBuilder {
    query: String,
    filter: Option<String>,
    top_k: usize,
}

impl Default for SearchRequestBuilder {
    fn default() -> Self {
        Self {
            query: String::new(),
            filter: None,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl SearchRequestBuilder {
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn clear_filter(mut self) -> Self {
        self.filter = None;
        self
    }

    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn build(self) -> SearchRequest {
        SearchRequest {
            query: self.query,
            filter: self.filter,
            top_k: self.top_k,
        }
    }
}

/// Similarity search over stored documents. Backend drivers live outside
/// this workspace; tests supply doubles.
pub trait VectorStore: Send + Sync {
    fn search<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> BoxFuture<'a, Result<Vec<Document>, QueryError>>;
}
