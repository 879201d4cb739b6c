//! Chat client orchestrating the advisor chain around a model.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use futures_core::Stream;
use futures_util::StreamExt;
use wprovider::{
    AssistantMessage, ChatModel, ChatResponse, ChatResponseMetadata, Generation,
    GenerationMetadata, Prompt, PropertyMap, TokenUsage, ToolCall,
};

use crate::{
    AdvisedRequest, AdvisedResponse, Advisor, ChatError, ChatRuntimeHooks, NoopChatRuntimeHooks,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ChatStreamEvent {
    Chunk(ChatResponse),
    Complete(AdvisedResponse),
}

pub type ChatEventStream<'a> =
    Pin<Box<dyn Stream<Item = Result<ChatStreamEvent, ChatError>> + Send + 'a>>;

/// Runs a prompt through the registered advisors and the underlying model.
///
/// Request hooks run in registration order; response hooks unwind in reverse
/// registration order, so the first-registered advisor sees the response
/// last. Advisors run on the caller's task; nothing here dispatches threads.
#[derive(Clone)]
pub struct ChatClient {
    model: Arc<dyn ChatModel>,
    advisors: Vec<Arc<dyn Advisor>>,
    hooks: Arc<dyn ChatRuntimeHooks>,
}

impl ChatClient {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            advisors: Vec::new(),
            hooks: Arc::new(NoopChatRuntimeHooks),
        }
    }

    pub fn builder(model: Arc<dyn ChatModel>) -> ChatClientBuilder {
        ChatClientBuilder::new(model)
    }

    pub async fn call(&self, prompt: Prompt) -> Result<ChatResponse, ChatError> {
        self.call_advised(AdvisedRequest::new(prompt))
            .await
            .map(|advised| advised.response)
    }

    pub async fn call_advised(
        &self,
        request: AdvisedRequest,
    ) -> Result<AdvisedResponse, ChatError> {
        request.prompt.validate()?;

        let request = self.run_request_advisors(request).await?;
        let AdvisedRequest { prompt, context } = request;

        let started = Instant::now();
        self.hooks.on_model_call_start(self.model.model_name());
        let response = match self.model.call(prompt.clone()).await {
            Ok(response) => {
                self.hooks.on_model_call_success(
                    self.model.model_name(),
                    response.usage(),
                    started.elapsed(),
                );
                response
            }
            Err(error) => {
                let error = ChatError::from(error);
                self.hooks.on_model_call_failure(
                    self.model.model_name(),
                    &error,
                    started.elapsed(),
                );
                return Err(error);
            }
        };

        self.run_response_advisors(AdvisedResponse::new(response, prompt, context))
            .await
    }

    /// Streaming variant: request advisors apply up front, the model stream
    /// is drained and aggregated, response advisors apply to the aggregate,
    /// then the original chunks plus the advised completion replay as a
    /// buffered stream.
    pub async fn stream_advised<'a>(
        &'a self,
        request: AdvisedRequest,
    ) -> Result<ChatEventStream<'a>, ChatError> {
        request.prompt.validate()?;

        let request = self.run_request_advisors(request).await?;
        let AdvisedRequest { prompt, context } = request;

        let started = Instant::now();
        self.hooks.on_model_call_start(self.model.model_name());
        let mut model_stream = match self.model.stream(prompt.clone()).await {
            Ok(stream) => stream,
            Err(error) => {
                let error = ChatError::from(error);
                self.hooks.on_model_call_failure(
                    self.model.model_name(),
                    &error,
                    started.elapsed(),
                );
                return Err(error);
            }
        };

        let mut chunks = Vec::new();
        while let Some(chunk) = model_stream.next().await {
            match chunk {
                Ok(chunk) => chunks.push(chunk),
                Err(error) => {
                    let error = ChatError::from(error);
                    self.hooks.on_model_call_failure(
                        self.model.model_name(),
                        &error,
                        started.elapsed(),
                    );
                    return Err(error);
                }
            }
        }

        let aggregate = aggregate_chunks(self.model.model_name(), &chunks);
        self.hooks.on_model_call_success(
            self.model.model_name(),
            aggregate.usage(),
            started.elapsed(),
        );

        let advised = self
            .run_response_advisors(AdvisedResponse::new(aggregate, prompt, context))
            .await?;

        let mut events: Vec<Result<ChatStreamEvent, ChatError>> = chunks
            .into_iter()
            .map(|chunk| Ok(ChatStreamEvent::Chunk(chunk)))
            .collect();
        events.push(Ok(ChatStreamEvent::Complete(advised)));

        Ok(Box::pin(BufferedChatStream::new(events)))
    }

    pub async fn stream<'a>(&'a self, prompt: Prompt) -> Result<ChatEventStream<'a>, ChatError> {
        self.stream_advised(AdvisedRequest::new(prompt)).await
    }

    async fn run_request_advisors(
        &self,
        mut request: AdvisedRequest,
    ) -> Result<AdvisedRequest, ChatError> {
        for advisor in &self.advisors {
            self.hooks
                .on_advisor_request(advisor.name(), request.context.conversation_id());
            request = match advisor.advise_request(request).await {
                Ok(request) => request,
                Err(error) => {
                    self.hooks
                        .on_advisor_failure(advisor.name(), None, &error);
                    return Err(error);
                }
            };
        }

        Ok(request)
    }

    async fn run_response_advisors(
        &self,
        mut advised: AdvisedResponse,
    ) -> Result<AdvisedResponse, ChatError> {
        for advisor in self.advisors.iter().rev() {
            self.hooks
                .on_advisor_response(advisor.name(), advised.context.conversation_id());
            advised = match advisor.advise_response(advised).await {
                Ok(advised) => advised,
                Err(error) => {
                    self.hooks
                        .on_advisor_failure(advisor.name(), None, &error);
                    return Err(error);
                }
            };
        }

        Ok(advised)
    }
}

#[derive(Clone)]
pub struct ChatClientBuilder {
    model: Arc<dyn ChatModel>,
    advisors: Vec<Arc<dyn Advisor>>,
    hooks: Arc<dyn ChatRuntimeHooks>,
}

impl ChatClientBuilder {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            advisors: Vec::new(),
            hooks: Arc::new(NoopChatRuntimeHooks),
        }
    }

    pub fn advisor(mut self, advisor: Arc<dyn Advisor>) -> Self {
        self.advisors.push(advisor);
        self
    }

    pub fn advisors(mut self, advisors: Vec<Arc<dyn Advisor>>) -> Self {
        self.advisors.extend(advisors);
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn ChatRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> ChatClient {
        ChatClient {
            model: self.model,
            advisors: self.advisors,
            hooks: self.hooks,
        }
    }
}

fn aggregate_chunks(model_name: &str, chunks: &[ChatResponse]) -> ChatResponse {
    let mut text = String::new();
    let mut tool_calls: Vec<ToolCall> = Vec::new();
    let mut properties = PropertyMap::new();
    let mut finish_reason = None;
    let mut usage = TokenUsage::default();
    let mut model = model_name.to_string();

    for chunk in chunks {
        if !chunk.metadata.model.is_empty() {
            model = chunk.metadata.model.clone();
        }

        if chunk.metadata.usage != TokenUsage::default() {
            usage = chunk.metadata.usage;
        }

        if let Some(generation) = chunk.first_generation() {
            text.push_str(generation.text());
            tool_calls.extend(generation.message.tool_calls.iter().cloned());
            properties.extend(generation.metadata.properties.clone());
            if let Some(reason) = generation.metadata.finish_reason {
                finish_reason = Some(reason);
            }
        }
    }

    let mut metadata = GenerationMetadata::empty();
    metadata.finish_reason = finish_reason;
    metadata.properties = properties;

    ChatResponse::new(
        vec![
            Generation::new(AssistantMessage::new(text).with_tool_calls(tool_calls))
                .with_metadata(metadata),
        ],
        ChatResponseMetadata::new(model).with_usage(usage),
    )
}

#[derive(Debug)]
struct BufferedChatStream {
    events: VecDeque<Result<ChatStreamEvent, ChatError>>,
}

impl BufferedChatStream {
    fn new(events: Vec<Result<ChatStreamEvent, ChatError>>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

impl Stream for BufferedChatStream {
    type Item = Result<ChatStreamEvent, ChatError>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.events.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use futures_util::StreamExt;
    use wcommon::BoxFuture;
    use wprovider::{
        BoxedResponseStream, FinishReason, Message, ModelError, ModelFuture, VecResponseStream,
    };

    use super::*;
    use crate::{AdvisorContext, ChatErrorKind};

    #[derive(Debug)]
    struct FakeModel {
        prompts: Mutex<Vec<Prompt>>,
    }

    impl FakeModel {
        fn new() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChatModel for FakeModel {
        fn model_name(&self) -> &str {
            "fake-model"
        }

        fn call<'a>(&'a self, prompt: Prompt) -> ModelFuture<'a, Result<ChatResponse, ModelError>> {
            Box::pin(async move {
                self.prompts
                    .lock()
                    .expect("prompts lock")
                    .push(prompt.clone());

                Ok(ChatResponse::from_text("fake-model", "assistant reply"))
            })
        }

        fn stream<'a>(
            &'a self,
            prompt: Prompt,
        ) -> ModelFuture<'a, Result<BoxedResponseStream<'a>, ModelError>> {
            Box::pin(async move {
                self.prompts
                    .lock()
                    .expect("prompts lock")
                    .push(prompt.clone());

                let final_chunk = ChatResponse::new(
                    vec![
                        Generation::new(AssistantMessage::new(" world")).with_metadata(
                            GenerationMetadata::empty().with_finish_reason(FinishReason::Stop),
                        ),
                    ],
                    ChatResponseMetadata::new("fake-model")
                        .with_usage(TokenUsage::new(12, 6)),
                );

                let stream = VecResponseStream::new(vec![
                    Ok(ChatResponse::from_text("fake-model", "hello")),
                    Ok(final_chunk),
                ]);

                Ok(Box::pin(stream) as BoxedResponseStream<'a>)
            })
        }
    }

    struct RecordingAdvisor {
        label: String,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingAdvisor {
        fn new(label: &str, log: Arc<Mutex<Vec<String>>>) -> Arc<Self> {
            Arc::new(Self {
                label: label.to_string(),
                log,
            })
        }
    }

    impl Advisor for RecordingAdvisor {
        fn name(&self) -> &str {
            &self.label
        }

        fn advise_request<'a>(
            &'a self,
            request: AdvisedRequest,
        ) -> BoxFuture<'a, Result<AdvisedRequest, ChatError>> {
            Box::pin(async move {
                self.log
                    .lock()
                    .expect("log lock")
                    .push(format!("{}:request", self.label));
                Ok(request)
            })
        }

        fn advise_response<'a>(
            &'a self,
            response: AdvisedResponse,
        ) -> BoxFuture<'a, Result<AdvisedResponse, ChatError>> {
            Box::pin(async move {
                self.log
                    .lock()
                    .expect("log lock")
                    .push(format!("{}:response", self.label));
                Ok(response)
            })
        }
    }

    struct FailingAdvisor;

    impl Advisor for FailingAdvisor {
        fn name(&self) -> &str {
            "failing"
        }

        fn advise_request<'a>(
            &'a self,
            _request: AdvisedRequest,
        ) -> BoxFuture<'a, Result<AdvisedRequest, ChatError>> {
            Box::pin(async { Err(ChatError::advisor("deliberate failure")) })
        }
    }

    #[tokio::test]
    async fn request_advisors_run_forward_and_response_advisors_unwind() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let model = Arc::new(FakeModel::new());
        let client = ChatClient::builder(model)
            .advisor(RecordingAdvisor::new("outer", Arc::clone(&log)))
            .advisor(RecordingAdvisor::new("inner", Arc::clone(&log)))
            .build();

        let _ = client
            .call(Prompt::from_text("hello"))
            .await
            .expect("call should work");

        let observed = log.lock().expect("log lock").clone();
        assert_eq!(
            observed,
            vec![
                "outer:request".to_string(),
                "inner:request".to_string(),
                "inner:response".to_string(),
                "outer:response".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn call_advised_sends_the_advised_prompt_to_the_model() {
        struct SystemTextAdvisor;

        impl Advisor for SystemTextAdvisor {
            fn name(&self) -> &str {
                "system-text"
            }

            fn advise_request<'a>(
                &'a self,
                request: AdvisedRequest,
            ) -> BoxFuture<'a, Result<AdvisedRequest, ChatError>> {
                Box::pin(async move {
                    Ok(request.map_prompt(|prompt| prompt.with_system_text("injected context")))
                })
            }
        }

        let model = Arc::new(FakeModel::new());
        let client = ChatClient::builder(model.clone())
            .advisor(Arc::new(SystemTextAdvisor))
            .build();

        let advised = client
            .call_advised(
                AdvisedRequest::new(Prompt::from_text("question"))
                    .with_context(AdvisorContext::for_conversation("conversation-7")),
            )
            .await
            .expect("call should work");

        let prompts = model.prompts.lock().expect("prompts lock");
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].system_text(), Some("injected context"));
        assert_eq!(advised.prompt.system_text(), Some("injected context"));
        assert_eq!(advised.response.text(), "assistant reply");
        assert_eq!(
            advised.context.conversation_id().map(|id| id.as_str()),
            Some("conversation-7")
        );
    }

    #[tokio::test]
    async fn advisor_error_aborts_before_the_model_is_invoked() {
        let model = Arc::new(FakeModel::new());
        let client = ChatClient::builder(model.clone())
            .advisor(Arc::new(FailingAdvisor))
            .build();

        let error = client
            .call(Prompt::from_text("hello"))
            .await
            .expect_err("call should fail");

        assert_eq!(error.kind, ChatErrorKind::Advisor);
        assert!(model.prompts.lock().expect("prompts lock").is_empty());
    }

    #[tokio::test]
    async fn call_rejects_prompts_that_fail_validation() {
        let model = Arc::new(FakeModel::new());
        let client = ChatClient::new(model.clone());

        let error = client
            .call(Prompt::new(vec![]))
            .await
            .expect_err("empty prompt should fail");

        assert_eq!(error.kind, ChatErrorKind::InvalidRequest);
        assert!(model.prompts.lock().expect("prompts lock").is_empty());
    }

    #[tokio::test]
    async fn stream_replays_chunks_then_completes_with_the_aggregate() {
        let model = Arc::new(FakeModel::new());
        let client = ChatClient::new(model);

        let mut stream = client
            .stream(Prompt::from_text("hello"))
            .await
            .expect("stream should build");

        let mut events = Vec::new();
        while let Some(event) = stream.next().await {
            events.push(event.expect("event should be ok"));
        }

        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], ChatStreamEvent::Chunk(_)));
        assert!(matches!(events[1], ChatStreamEvent::Chunk(_)));

        let ChatStreamEvent::Complete(advised) = &events[2] else {
            panic!("last event should be the completion");
        };
        assert_eq!(advised.response.text(), "hello world");
        assert_eq!(advised.response.usage(), TokenUsage::new(12, 6));
        assert_eq!(
            advised.response.generations[0].metadata.finish_reason,
            Some(FinishReason::Stop)
        );
    }

    #[test]
    fn aggregate_chunks_merges_text_calls_and_metadata() {
        let first = ChatResponse::new(
            vec![Generation::new(
                AssistantMessage::new("part one ").with_tool_calls(vec![ToolCall {
                    id: "call_1".to_string(),
                    name: "lookup".to_string(),
                    arguments: "{}".to_string(),
                }]),
            )],
            ChatResponseMetadata::new("chunked-model"),
        );
        let second = ChatResponse::new(
            vec![
                Generation::new(AssistantMessage::new("part two")).with_metadata(
                    GenerationMetadata::empty().with_finish_reason(FinishReason::Stop),
                ),
            ],
            ChatResponseMetadata::new("chunked-model").with_usage(TokenUsage::new(5, 7)),
        );

        let merged = aggregate_chunks("fallback", &[first, second]);
        assert_eq!(merged.text(), "part one part two");
        assert_eq!(merged.metadata.model, "chunked-model");
        assert_eq!(merged.usage(), TokenUsage::new(5, 7));

        let generation = merged.first_generation().expect("merged generation");
        assert_eq!(generation.message.tool_calls.len(), 1);
        assert_eq!(generation.metadata.finish_reason, Some(FinishReason::Stop));

        let empty = aggregate_chunks("fallback", &[]);
        assert_eq!(empty.text(), "");
        assert_eq!(empty.metadata.model, "fallback");
    }

    #[test]
    fn message_helpers_compose_with_prompt_builder() {
        let prompt = Prompt::builder()
            .message(Message::system("be concise"))
            .message(Message::user("hello"))
            .build()
            .expect("prompt should build");

        assert_eq!(prompt.messages().len(), 2);
    }
}
