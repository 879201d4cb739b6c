//! Common imports for most weft applications.

pub use crate::{
    assistant_message, build_runtime, build_runtime_with, build_runtime_with_config, chat_client,
    chat_client_with_memory, conversation_context, document, in_memory_chat_memory, prompt,
    query, system_message, tool_message, user_message,
};
pub use crate::{weft_messages, weft_msg, weft_prompt};
pub use crate::{
    AdvisedRequest, AdvisedResponse, Advisor, AdvisorContext, AttributeInfo, BoxFuture,
    ChatClient, ChatClientBuilder, ChatError, ChatErrorKind, ChatEventStream, ChatMemory,
    ChatModel, ChatOptions, ChatResponse, ChatRuntimeHooks, ChatStreamEvent,
    ContextualQueryAugmenter, ConversationId, ConversationMemoryAdvisor, Document,
    FunctionTool, Generation, InMemoryChatMemory, MemoryBackendConfig, MemoryError, Message,
    ModelError, ModelOperationHooks, MultiQueryExpander, Prompt, PromptBuilder, PromptTemplate,
    Query, QueryError, RetrievalAugmentationAdvisor, RetryPolicy, RetryingModel, Role,
    RuntimeBundle, SearchRequest, SqliteChatMemory, StructuredQueryAdvisor, TokenUsage, Tool,
    ToolCall, ToolDefinition, ToolRegistry, VectorStore,
};
