//! Query-layer errors for transformation and retrieval operations.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    Model,
    MalformedOutput,
    InvalidRequest,
    Store,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    pub kind: QueryErrorKind,
    pub message: String,
}

impl QueryError {
    pub fn new(kind: QueryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn model(message: impl Into<String>) -> Self {
        Self::new(QueryErrorKind::Model, message)
    }

    pub fn malformed_output(message: impl Into<String>) -> Self {
        Self::new(QueryErrorKind::MalformedOutput, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(QueryErrorKind::InvalidRequest, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(QueryErrorKind::Store, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(QueryErrorKind::Other, message)
    }
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for QueryError {}

impl From<wprovider::ModelError> for QueryError {
    fn from(value: wprovider::ModelError) -> Self {
        QueryError::model(value.to_string())
    }
}

impl From<QueryError> for wchat::ChatError {
    fn from(value: QueryError) -> Self {
        wchat::ChatError::advisor(value.to_string())
    }
}
