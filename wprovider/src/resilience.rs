//! Standard retry/backoff policy, operational hook contracts, and a
//! retrying model decorator.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::{BoxedResponseStream, ChatModel, ChatResponse, ModelError, ModelFuture, Prompt};

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    pub fn should_retry(&self, attempt: u32, error: &ModelError) -> bool {
        error.retryable && attempt < self.max_attempts
    }

    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = (attempt.saturating_sub(1)) as i32;
        let unbounded = self.initial_backoff.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        Duration::from_secs_f64(unbounded.min(self.max_backoff.as_secs_f64()))
    }
}

pub trait ModelOperationHooks: Send + Sync {
    fn on_attempt_start(&self, _model: &str, _operation: &str, _attempt: u32) {}

    fn on_retry_scheduled(
        &self,
        _model: &str,
        _operation: &str,
        _attempt: u32,
        _delay: Duration,
        _error: &ModelError,
    ) {
    }

    fn on_success(&self, _model: &str, _operation: &str, _attempts: u32) {}

    fn on_failure(&self, _model: &str, _operation: &str, _attempts: u32, _error: &ModelError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ModelOperationHooks for NoopOperationHooks {}

pub async fn execute_with_retry<T, Op, OpFuture, Sleep, SleepFuture>(
    model: &str,
    operation: &str,
    policy: &RetryPolicy,
    hooks: &dyn ModelOperationHooks,
    mut execute: Op,
    mut sleep: Sleep,
) -> Result<T, ModelError>
where
    Op: FnMut(u32) -> OpFuture,
    OpFuture: Future<Output = Result<T, ModelError>>,
    Sleep: FnMut(Duration) -> SleepFuture,
    SleepFuture: Future<Output = ()>,
{
    let mut attempt = 1;

    loop {
        hooks.on_attempt_start(model, operation, attempt);

        match execute(attempt).await {
            Ok(value) => {
                hooks.on_success(model, operation, attempt);
                return Ok(value);
            }
            Err(error) => {
                if policy.should_retry(attempt, &error) {
                    let delay = policy.backoff_for_attempt(attempt);
                    hooks.on_retry_scheduled(model, operation, attempt, delay, &error);
                    sleep(delay).await;
                    attempt += 1;
                    continue;
                }

                hooks.on_failure(model, operation, attempt, &error);
                return Err(error);
            }
        }
    }
}

/// Decorator applying a [`RetryPolicy`] around an inner model.
///
/// Retries cover `call` attempts and stream establishment; once a stream is
/// handed out, its items are not retried.
pub struct RetryingModel {
    inner: Arc<dyn ChatModel>,
    policy: RetryPolicy,
    hooks: Arc<dyn ModelOperationHooks>,
}

impl RetryingModel {
    pub fn new(inner: Arc<dyn ChatModel>, policy: RetryPolicy) -> Self {
        Self {
            inner,
            policy,
            hooks: Arc::new(NoopOperationHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ModelOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }
}

impl ChatModel for RetryingModel {
    fn model_name(&self) -> &str {
        self.inner.model_name()
    }

    fn call<'a>(&'a self, prompt: Prompt) -> ModelFuture<'a, Result<ChatResponse, ModelError>> {
        Box::pin(async move {
            execute_with_retry(
                self.inner.model_name(),
                "call",
                &self.policy,
                self.hooks.as_ref(),
                |_| {
                    let prompt = prompt.clone();
                    self.inner.call(prompt)
                },
                |delay| futures_timer::Delay::new(delay),
            )
            .await
        })
    }

    fn stream<'a>(
        &'a self,
        prompt: Prompt,
    ) -> ModelFuture<'a, Result<BoxedResponseStream<'a>, ModelError>> {
        Box::pin(async move {
            execute_with_retry(
                self.inner.model_name(),
                "stream",
                &self.policy,
                self.hooks.as_ref(),
                |_| {
                    let prompt = prompt.clone();
                    self.inner.stream(prompt)
                },
                |delay| futures_timer::Delay::new(delay),
            )
            .await
        })
    }
}
