use std::future::Future;
use std::pin::Pin;

use crate::{BoxedResponseStream, ChatResponse, ModelError, Prompt};

pub type ModelFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait ChatModel: Send + Sync {
    fn model_name(&self) -> &str;

    fn call<'a>(&'a self, prompt: Prompt) -> ModelFuture<'a, Result<ChatResponse, ModelError>>;

    fn stream<'a>(
        &'a self,
        prompt: Prompt,
    ) -> ModelFuture<'a, Result<BoxedResponseStream<'a>, ModelError>>;
}
