//! Generation and response value types returned by chat models.
//!
//! ```rust
//! use wprovider::{AssistantMessage, ChatResponse, ChatResponseMetadata, Generation};
//!
//! let response = ChatResponse::new(
//!     vec![Generation::new(AssistantMessage::new("hello"))],
//!     ChatResponseMetadata::new("gpt-4o-mini"),
//! );
//!
//! assert_eq!(response.text(), "hello");
//! assert!(response.generations[0].metadata.finish_reason.is_none());
//! ```

use serde::{Deserialize, Serialize};

use crate::{AssistantMessage, PropertyMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    MaxTokens,
    ToolCall,
    ContentFilter,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

/// Per-generation metadata. Always present: absent metadata is represented
/// by the empty value, never by an option.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub finish_reason: Option<FinishReason>,
    #[serde(default)]
    pub properties: PropertyMap,
}

impl GenerationMetadata {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_finish_reason(mut self, finish_reason: FinishReason) -> Self {
        self.finish_reason = Some(finish_reason);
        self
    }

    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// One candidate assistant output and its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub message: AssistantMessage,
    pub metadata: GenerationMetadata,
}

impl Generation {
    pub fn new(message: AssistantMessage) -> Self {
        Self {
            message,
            metadata: GenerationMetadata::empty(),
        }
    }

    pub fn with_metadata(mut self, metadata: GenerationMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn text(&self) -> &str {
        &self.message.content
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatResponseMetadata {
    pub model: String,
    pub usage: TokenUsage,
}

impl ChatResponseMetadata {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            usage: TokenUsage::default(),
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = usage;
        self
    }
}

/// Ordered candidate generations plus response-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub generations: Vec<Generation>,
    pub metadata: ChatResponseMetadata,
}

impl ChatResponse {
    pub fn new(generations: Vec<Generation>, metadata: ChatResponseMetadata) -> Self {
        Self {
            generations,
            metadata,
        }
    }

    pub fn from_text(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            vec![Generation::new(AssistantMessage::new(text))],
            ChatResponseMetadata::new(model),
        )
    }

    pub fn first_generation(&self) -> Option<&Generation> {
        self.generations.first()
    }

    /// Text of the first generation; empty when the response has none.
    pub fn text(&self) -> &str {
        self.first_generation()
            .map(Generation::text)
            .unwrap_or_default()
    }

    pub fn usage(&self) -> TokenUsage {
        self.metadata.usage
    }
}
