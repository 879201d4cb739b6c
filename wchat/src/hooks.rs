//! Runtime hook contracts for observing chain and model execution.
//!
//! ```rust
//! use wchat::{ChatRuntimeHooks, NoopChatRuntimeHooks};
//!
//! fn accepts_hooks(_hooks: &dyn ChatRuntimeHooks) {}
//!
//! let hooks = NoopChatRuntimeHooks;
//! accepts_hooks(&hooks);
//! ```

use std::time::Duration;

use wcommon::ConversationId;
use wprovider::TokenUsage;

use crate::ChatError;

pub trait ChatRuntimeHooks: Send + Sync {
    fn on_advisor_request(&self, _advisor: &str, _conversation_id: Option<&ConversationId>) {}

    fn on_advisor_response(&self, _advisor: &str, _conversation_id: Option<&ConversationId>) {}

    fn on_advisor_failure(
        &self,
        _advisor: &str,
        _conversation_id: Option<&ConversationId>,
        _error: &ChatError,
    ) {
    }

    fn on_model_call_start(&self, _model: &str) {}

    fn on_model_call_success(&self, _model: &str, _usage: TokenUsage, _elapsed: Duration) {}

    fn on_model_call_failure(&self, _model: &str, _error: &ChatError, _elapsed: Duration) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopChatRuntimeHooks;

impl ChatRuntimeHooks for NoopChatRuntimeHooks {}
