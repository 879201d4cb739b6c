//! Query and retrieved-document value types.
//!
//! ```rust
//! use wquery::{Document, Query};
//!
//! let query = Query::new("release notes for 4.2");
//! let document = Document::new("4.2 ships the retry decorator");
//!
//! assert_eq!(query.text, "release notes for 4.2");
//! assert_eq!(document.content, "4.2 ships the retry decorator");
//! ```

use serde::{Deserialize, Serialize};
use wprovider::PropertyMap;

/// A text information need. Transforms return new queries; the value itself
/// never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<&str> for Query {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Query {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// One retrieved context unit: content plus free-form metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    #[serde(default)]
    pub metadata: PropertyMap,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: PropertyMap::new(),
        }
    }

    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
