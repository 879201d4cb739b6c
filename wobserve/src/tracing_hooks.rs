//! Tracing-based observability hooks for model operations and the chain.
//!
//! ```rust
//! use wchat::ChatRuntimeHooks;
//! use wobserve::TracingChatHooks;
//!
//! fn accepts_chain_hooks(_hooks: &dyn ChatRuntimeHooks) {}
//!
//! let hooks = TracingChatHooks;
//! accepts_chain_hooks(&hooks);
//! ```

use std::time::Duration;

use wchat::{ChatError, ChatRuntimeHooks};
use wcommon::ConversationId;
use wprovider::{ModelError, ModelOperationHooks, TokenUsage};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingChatHooks;

impl ModelOperationHooks for TracingChatHooks {
    fn on_attempt_start(&self, model: &str, operation: &str, attempt: u32) {
        tracing::info!(
            phase = "model",
            event = "attempt_start",
            model,
            operation,
            attempt
        );
    }

    fn on_retry_scheduled(
        &self,
        model: &str,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &ModelError,
    ) {
        tracing::warn!(
            phase = "model",
            event = "retry_scheduled",
            model,
            operation,
            attempt,
            delay_ms = delay.as_millis() as u64,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }

    fn on_success(&self, model: &str, operation: &str, attempts: u32) {
        tracing::info!(
            phase = "model",
            event = "success",
            model,
            operation,
            attempts
        );
    }

    fn on_failure(&self, model: &str, operation: &str, attempts: u32, error: &ModelError) {
        tracing::error!(
            phase = "model",
            event = "failure",
            model,
            operation,
            attempts,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }
}

impl ChatRuntimeHooks for TracingChatHooks {
    fn on_advisor_request(&self, advisor: &str, conversation_id: Option<&ConversationId>) {
        tracing::info!(
            phase = "chain",
            event = "advisor_request",
            advisor,
            conversation_id = conversation_id.map(|id| id.as_str())
        );
    }

    fn on_advisor_response(&self, advisor: &str, conversation_id: Option<&ConversationId>) {
        tracing::info!(
            phase = "chain",
            event = "advisor_response",
            advisor,
            conversation_id = conversation_id.map(|id| id.as_str())
        );
    }

    fn on_advisor_failure(
        &self,
        advisor: &str,
        conversation_id: Option<&ConversationId>,
        error: &ChatError,
    ) {
        tracing::error!(
            phase = "chain",
            event = "advisor_failure",
            advisor,
            conversation_id = conversation_id.map(|id| id.as_str()),
            error_kind = ?error.kind,
            error = %error
        );
    }

    fn on_model_call_start(&self, model: &str) {
        tracing::info!(phase = "chain", event = "model_call_start", model);
    }

    fn on_model_call_success(&self, model: &str, usage: TokenUsage, elapsed: Duration) {
        tracing::info!(
            phase = "chain",
            event = "model_call_success",
            model,
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            total_tokens = usage.total_tokens,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_model_call_failure(&self, model: &str, error: &ChatError, elapsed: Duration) {
        tracing::error!(
            phase = "chain",
            event = "model_call_failure",
            model,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }
}
