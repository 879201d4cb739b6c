//! Advisor contracts and the typed context threaded through the chain.
//!
//! ```rust
//! use wchat::{AdvisedRequest, AdvisorContext};
//! use wprovider::Prompt;
//!
//! let context = AdvisorContext::for_conversation("conversation-1")
//!     .with_property("tenant", "acme");
//! let request = AdvisedRequest::new(Prompt::from_text("hello")).with_context(context);
//!
//! assert_eq!(
//!     request.context.conversation_id().map(|id| id.as_str()),
//!     Some("conversation-1")
//! );
//! ```

use wcommon::{BoxFuture, ConversationId};
use wprovider::{ChatResponse, Prompt, PropertyMap};

use crate::ChatError;

/// Explicit request context threaded through the advisor chain.
///
/// Context values travel by value: an advisor derives a new context with the
/// `with_*` helpers and returns it, so no two advisors ever share a mutable
/// view. Advisors that stash state in the property map own their key
/// namespace; colliding on another advisor's keys is a caller bug the
/// framework does not police.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdvisorContext {
    conversation_id: Option<ConversationId>,
    properties: PropertyMap,
}

impl AdvisorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_conversation(conversation_id: impl Into<ConversationId>) -> Self {
        Self {
            conversation_id: Some(conversation_id.into()),
            properties: PropertyMap::new(),
        }
    }

    pub fn conversation_id(&self) -> Option<&ConversationId> {
        self.conversation_id.as_ref()
    }

    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn with_conversation_id(mut self, conversation_id: impl Into<ConversationId>) -> Self {
        self.conversation_id = Some(conversation_id.into());
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

/// The outgoing prompt plus its context, as seen by request-side hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisedRequest {
    pub prompt: Prompt,
    pub context: AdvisorContext,
}

impl AdvisedRequest {
    pub fn new(prompt: Prompt) -> Self {
        Self {
            prompt,
            context: AdvisorContext::new(),
        }
    }

    pub fn with_context(mut self, context: AdvisorContext) -> Self {
        self.context = context;
        self
    }

    pub fn map_prompt(mut self, f: impl FnOnce(Prompt) -> Prompt) -> Self {
        self.prompt = f(self.prompt);
        self
    }
}

/// The model response, the prompt that actually reached the model, and the
/// final request context, as seen by response-side hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisedResponse {
    pub response: ChatResponse,
    pub prompt: Prompt,
    pub context: AdvisorContext,
}

impl AdvisedResponse {
    pub fn new(response: ChatResponse, prompt: Prompt, context: AdvisorContext) -> Self {
        Self {
            response,
            prompt,
            context,
        }
    }
}

/// Request/response interceptor composed into a chat invocation chain.
///
/// Both hooks default to identity. An error from either hook fails the
/// whole invocation; there is no partial-success path.
pub trait Advisor: Send + Sync {
    fn name(&self) -> &str;

    fn advise_request<'a>(
        &'a self,
        request: AdvisedRequest,
    ) -> BoxFuture<'a, Result<AdvisedRequest, ChatError>> {
        Box::pin(async move { Ok(request) })
    }

    fn advise_response<'a>(
        &'a self,
        response: AdvisedResponse,
    ) -> BoxFuture<'a, Result<AdvisedResponse, ChatError>> {
        Box::pin(async move { Ok(response) })
    }
}
