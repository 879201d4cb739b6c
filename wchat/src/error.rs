//! Chat-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidRequest,
    Model,
    Advisor,
    Memory,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message)
    }

    pub fn model(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Model, message)
    }

    pub fn advisor(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Advisor, message)
    }

    pub fn memory(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Memory, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Other, message)
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {}

impl From<wprovider::ModelError> for ChatError {
    fn from(value: wprovider::ModelError) -> Self {
        ChatError::model(value.to_string())
    }
}
