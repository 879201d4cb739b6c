use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use wchat::{ChatError, ChatRuntimeHooks};
use wcommon::ConversationId;
use wprovider::{ModelError, ModelOperationHooks, TokenUsage};

pub struct SafeModelHooks<H> {
    inner: H,
}

impl<H> SafeModelHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ModelOperationHooks for SafeModelHooks<H>
where
    H: ModelOperationHooks,
{
    fn on_attempt_start(&self, model: &str, operation: &str, attempt: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_attempt_start(model, operation, attempt)
        }));
    }

    fn on_retry_scheduled(
        &self,
        model: &str,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &ModelError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_retry_scheduled(model, operation, attempt, delay, error)
        }));
    }

    fn on_success(&self, model: &str, operation: &str, attempts: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(model, operation, attempts)
        }));
    }

    fn on_failure(&self, model: &str, operation: &str, attempts: u32, error: &ModelError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(model, operation, attempts, error)
        }));
    }
}

pub struct SafeChatHooks<H> {
    inner: H,
}

impl<H> SafeChatHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ChatRuntimeHooks for SafeChatHooks<H>
where
    H: ChatRuntimeHooks,
{
    fn on_advisor_request(&self, advisor: &str, conversation_id: Option<&ConversationId>) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_advisor_request(advisor, conversation_id)
        }));
    }

    fn on_advisor_response(&self, advisor: &str, conversation_id: Option<&ConversationId>) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_advisor_response(advisor, conversation_id)
        }));
    }

    fn on_advisor_failure(
        &self,
        advisor: &str,
        conversation_id: Option<&ConversationId>,
        error: &ChatError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_advisor_failure(advisor, conversation_id, error)
        }));
    }

    fn on_model_call_start(&self, model: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_model_call_start(model)));
    }

    fn on_model_call_success(&self, model: &str, usage: TokenUsage, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_model_call_success(model, usage, elapsed)
        }));
    }

    fn on_model_call_failure(&self, model: &str, error: &ChatError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_model_call_failure(model, error, elapsed)
        }));
    }
}
