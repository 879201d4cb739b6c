//! Runtime wiring helpers for advisor-chain chat usage.

use std::sync::Arc;

use crate::{
    ChatClient, ChatMemory, ChatModel, ChatRuntimeHooks, ConversationMemoryAdvisor,
    InMemoryChatMemory, MemoryBackendConfig, MemoryError, create_chat_memory,
};

#[derive(Clone)]
pub struct RuntimeBundle {
    pub memory: Arc<dyn ChatMemory>,
    pub client: ChatClient,
}

pub fn in_memory_chat_memory() -> Arc<dyn ChatMemory> {
    Arc::new(InMemoryChatMemory::new())
}

pub fn chat_client(model: Arc<dyn ChatModel>) -> ChatClient {
    ChatClient::builder(model).build()
}

pub fn chat_client_with_memory(
    model: Arc<dyn ChatModel>,
    memory: Arc<dyn ChatMemory>,
) -> ChatClient {
    ChatClient::builder(model)
        .advisor(Arc::new(ConversationMemoryAdvisor::new(memory)))
        .build()
}

pub fn build_runtime(model: Arc<dyn ChatModel>) -> RuntimeBundle {
    build_runtime_with(model, in_memory_chat_memory(), None)
}

pub fn build_runtime_with_config(
    model: Arc<dyn ChatModel>,
    config: MemoryBackendConfig,
) -> Result<RuntimeBundle, MemoryError> {
    Ok(build_runtime_with(model, create_chat_memory(config)?, None))
}

pub fn build_runtime_with(
    model: Arc<dyn ChatModel>,
    memory: Arc<dyn ChatMemory>,
    hooks: Option<Arc<dyn ChatRuntimeHooks>>,
) -> RuntimeBundle {
    let mut builder = ChatClient::builder(model)
        .advisor(Arc::new(ConversationMemoryAdvisor::new(Arc::clone(&memory))));

    if let Some(hooks) = hooks {
        builder = builder.hooks(hooks);
    }

    RuntimeBundle {
        memory,
        client: builder.build(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        AdvisedRequest, AdvisorContext, BoxedResponseStream, ChatModel, ChatResponse,
        ConversationId, ModelError, ModelFuture, Prompt, Role,
    };

    use super::build_runtime;

    #[derive(Debug)]
    struct FakeModel;

    impl ChatModel for FakeModel {
        fn model_name(&self) -> &str {
            "fake-model"
        }

        fn call<'a>(&'a self, prompt: Prompt) -> ModelFuture<'a, Result<ChatResponse, ModelError>> {
            Box::pin(async move {
                prompt.validate()?;
                Ok(ChatResponse::from_text("fake-model", "done"))
            })
        }

        fn stream<'a>(
            &'a self,
            _prompt: Prompt,
        ) -> ModelFuture<'a, Result<BoxedResponseStream<'a>, ModelError>> {
            Box::pin(async {
                Err(ModelError::invalid_request(
                    "streaming not needed for this test model",
                ))
            })
        }
    }

    #[tokio::test]
    async fn build_runtime_wires_the_client_to_conversation_memory() {
        let runtime = build_runtime(Arc::new(FakeModel));

        let advised = runtime
            .client
            .call_advised(
                AdvisedRequest::new(Prompt::from_text("hello"))
                    .with_context(AdvisorContext::for_conversation("runtime-conversation")),
            )
            .await
            .expect("call should complete");
        assert_eq!(advised.response.text(), "done");

        let transcript = runtime
            .memory
            .get(&ConversationId::from("runtime-conversation"), 10)
            .await
            .expect("transcript should load");
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role(), Role::User);
        assert_eq!(transcript[1].role(), Role::Assistant);
    }
}
