use std::time::Duration;

use wchat::{ChatError, ChatRuntimeHooks};
use wcommon::ConversationId;
use wprovider::{ModelError, ModelOperationHooks, TokenUsage};

use crate::{MetricsChatHooks, SafeChatHooks, SafeModelHooks, TracingChatHooks};

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    let hooks = TracingChatHooks;
    let model_error = ModelError::timeout("model timeout");
    let chat_error = ChatError::advisor("advisor failed");
    let conversation = ConversationId::from("conversation-1");

    hooks.on_attempt_start("gpt-4o-mini", "call", 1);
    hooks.on_retry_scheduled(
        "gpt-4o-mini",
        "call",
        1,
        Duration::from_millis(10),
        &model_error,
    );
    hooks.on_success("gpt-4o-mini", "call", 2);
    hooks.on_failure("gpt-4o-mini", "call", 2, &model_error);

    hooks.on_advisor_request("conversation-memory", Some(&conversation));
    hooks.on_advisor_response("conversation-memory", Some(&conversation));
    hooks.on_advisor_failure("conversation-memory", Some(&conversation), &chat_error);
    hooks.on_model_call_start("gpt-4o-mini");
    hooks.on_model_call_success("gpt-4o-mini", TokenUsage::new(10, 4), Duration::from_millis(30));
    hooks.on_model_call_failure("gpt-4o-mini", &chat_error, Duration::from_millis(30));
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    let hooks = MetricsChatHooks;
    let model_error = ModelError::rate_limited("throttled");
    let chat_error = ChatError::model("upstream failure");

    hooks.on_attempt_start("gpt-4o-mini", "stream", 1);
    hooks.on_retry_scheduled(
        "gpt-4o-mini",
        "stream",
        1,
        Duration::from_millis(10),
        &model_error,
    );
    hooks.on_success("gpt-4o-mini", "stream", 2);
    hooks.on_failure("gpt-4o-mini", "stream", 2, &model_error);

    hooks.on_advisor_request("retrieval-augmentation", None);
    hooks.on_advisor_response("retrieval-augmentation", None);
    hooks.on_advisor_failure("retrieval-augmentation", None, &chat_error);
    hooks.on_model_call_start("gpt-4o-mini");
    hooks.on_model_call_success("gpt-4o-mini", TokenUsage::new(3, 9), Duration::from_millis(5));
    hooks.on_model_call_failure("gpt-4o-mini", &chat_error, Duration::from_millis(5));
}

struct PanickingHooks;

impl ModelOperationHooks for PanickingHooks {
    fn on_attempt_start(&self, _model: &str, _operation: &str, _attempt: u32) {
        panic!("hook panicked");
    }
}

impl ChatRuntimeHooks for PanickingHooks {
    fn on_model_call_start(&self, _model: &str) {
        panic!("hook panicked");
    }
}

#[test]
fn safe_model_hooks_swallow_inner_panics() {
    let hooks = SafeModelHooks::new(PanickingHooks);
    hooks.on_attempt_start("gpt-4o-mini", "call", 1);
    hooks.on_success("gpt-4o-mini", "call", 1);
}

#[test]
fn safe_chat_hooks_swallow_inner_panics() {
    let hooks = SafeChatHooks::new(PanickingHooks);
    hooks.on_model_call_start("gpt-4o-mini");
    hooks.on_advisor_request("conversation-memory", None);
}
