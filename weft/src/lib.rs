//! Unified facade over the weft workspace crates.
//!
//! This crate is designed to be the single dependency for most applications.
//! It re-exports the core weft crates and provides convenience utilities and
//! macros for common setup and request-building flows.

mod macros;

pub mod prelude;
pub mod runtime;
pub mod util;

pub use wchat;
pub use wcommon;
pub use wmemory;
pub use wobserve;
pub use wprovider;
pub use wquery;
pub use wtooling;

pub use wchat::{
    AdvisedRequest, AdvisedResponse, Advisor, AdvisorContext, ChatClient, ChatClientBuilder,
    ChatError, ChatErrorKind, ChatEventStream, ChatRuntimeHooks, ChatStreamEvent,
    NoopChatRuntimeHooks,
};
pub use wcommon::{BoxFuture, ChatOptions, ConversationId, MetadataMap, Registry, TraceId};
pub use wmemory::{
    ChatMemory, ConversationMemoryAdvisor, DEFAULT_CONVERSATION_ID, InMemoryChatMemory,
    MemoryBackendConfig, MemoryError, MemoryErrorKind, SqliteChatMemory, create_chat_memory,
    create_default_chat_memory,
};
pub use wobserve::{MetricsChatHooks, SafeChatHooks, SafeModelHooks, TracingChatHooks};
pub use wprovider::{
    AssistantMessage, BoxedResponseStream, ChatModel, ChatResponse, ChatResponseMetadata,
    FinishReason, Generation, GenerationMetadata, Message, ModelError, ModelErrorKind,
    ModelFuture, ModelOperationHooks, NoopOperationHooks, Prompt, PromptBuilder, PropertyMap,
    ResponseStream, RetryPolicy, RetryingModel, Role, SystemMessage, TokenUsage, ToolCall,
    ToolDefinition, ToolMessage, UserMessage, VecResponseStream, execute_with_retry,
};
pub use wquery::{
    AttributeInfo, ContextualQueryAugmenter, DEFAULT_TOP_K, Document, MultiQueryExpander,
    NO_FILTER, PromptTemplate, Query, QueryError, QueryErrorKind, RETRIEVED_DOCUMENTS_KEY,
    RetrievalAugmentationAdvisor, SearchRequest, SearchRequestBuilder, StructuredQueryAdvisor,
    VectorStore,
};
pub use wtooling::{
    FunctionTool, Tool, ToolError, ToolErrorKind, ToolExecutionContext, ToolExecutionResult,
    ToolFuture, ToolRegistry, parse_json_object, parse_json_value, required_string,
};

pub use runtime::{
    RuntimeBundle, build_runtime, build_runtime_with, build_runtime_with_config, chat_client,
    chat_client_with_memory, in_memory_chat_memory,
};
pub use util::{
    assistant_message, conversation_context, document, prompt, query, system_message,
    tool_message, user_message,
};

#[cfg(test)]
mod tests {
    use crate::Role;

    #[test]
    fn weft_msg_macro_creates_expected_message() {
        let message = crate::weft_msg!(user => "hello");
        assert_eq!(message.role(), Role::User);
        assert_eq!(message.content(), "hello");
    }

    #[test]
    fn weft_messages_macro_builds_message_vector() {
        let messages = crate::weft_messages![
            system => "You are concise.",
            user => "Summarize the repo",
        ];

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role(), Role::System);
        assert_eq!(messages[1].role(), Role::User);
    }

    #[test]
    fn weft_prompt_macro_builds_an_ordered_prompt() {
        let prompt = crate::weft_prompt![
            system => "You are concise.",
            user => "Summarize the repo",
        ];

        assert_eq!(prompt.system_text(), Some("You are concise."));
        assert_eq!(prompt.last_user_text(), Some("Summarize the repo"));
    }
}
