//! Metrics-based observability hooks for model operations and the chain.
//!
//! ```rust
//! use wobserve::MetricsChatHooks;
//! use wprovider::ModelOperationHooks;
//!
//! fn accepts_model_hooks(_hooks: &dyn ModelOperationHooks) {}
//!
//! let hooks = MetricsChatHooks;
//! accepts_model_hooks(&hooks);
//! ```

use std::time::Duration;

use wchat::{ChatError, ChatRuntimeHooks};
use wcommon::ConversationId;
use wprovider::{ModelError, ModelOperationHooks, TokenUsage};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsChatHooks;

impl ModelOperationHooks for MetricsChatHooks {
    fn on_attempt_start(&self, model: &str, operation: &str, _attempt: u32) {
        metrics::counter!(
            "weft_model_attempt_start_total",
            "model" => model.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_retry_scheduled(
        &self,
        model: &str,
        operation: &str,
        _attempt: u32,
        delay: Duration,
        error: &ModelError,
    ) {
        metrics::counter!(
            "weft_model_retry_scheduled_total",
            "model" => model.to_string(),
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "weft_model_retry_delay_seconds",
            "model" => model.to_string(),
            "operation" => operation.to_string()
        )
        .record(delay.as_secs_f64());
    }

    fn on_success(&self, model: &str, operation: &str, attempts: u32) {
        metrics::counter!(
            "weft_model_success_total",
            "model" => model.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "weft_model_attempts_per_success",
            "model" => model.to_string(),
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }

    fn on_failure(&self, model: &str, operation: &str, attempts: u32, error: &ModelError) {
        metrics::counter!(
            "weft_model_failure_total",
            "model" => model.to_string(),
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "weft_model_attempts_per_failure",
            "model" => model.to_string(),
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }
}

impl ChatRuntimeHooks for MetricsChatHooks {
    fn on_advisor_request(&self, advisor: &str, _conversation_id: Option<&ConversationId>) {
        metrics::counter!(
            "weft_chain_advisor_request_total",
            "advisor" => advisor.to_string()
        )
        .increment(1);
    }

    fn on_advisor_response(&self, advisor: &str, _conversation_id: Option<&ConversationId>) {
        metrics::counter!(
            "weft_chain_advisor_response_total",
            "advisor" => advisor.to_string()
        )
        .increment(1);
    }

    fn on_advisor_failure(
        &self,
        advisor: &str,
        _conversation_id: Option<&ConversationId>,
        error: &ChatError,
    ) {
        metrics::counter!(
            "weft_chain_advisor_failure_total",
            "advisor" => advisor.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }

    fn on_model_call_start(&self, model: &str) {
        metrics::counter!(
            "weft_chain_model_call_start_total",
            "model" => model.to_string()
        )
        .increment(1);
    }

    fn on_model_call_success(&self, model: &str, usage: TokenUsage, elapsed: Duration) {
        metrics::counter!(
            "weft_chain_model_call_success_total",
            "model" => model.to_string()
        )
        .increment(1);
        metrics::counter!(
            "weft_chain_total_tokens_total",
            "model" => model.to_string()
        )
        .increment(u64::from(usage.total_tokens));
        metrics::histogram!(
            "weft_chain_model_call_seconds",
            "model" => model.to_string()
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_model_call_failure(&self, model: &str, error: &ChatError, elapsed: Duration) {
        metrics::counter!(
            "weft_chain_model_call_failure_total",
            "model" => model.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "weft_chain_model_call_seconds",
            "model" => model.to_string()
        )
        .record(elapsed.as_secs_f64());
    }
}
