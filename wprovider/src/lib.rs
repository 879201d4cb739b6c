//! Provider-agnostic chat model abstraction: messages, prompts,
//! generations, streaming, and retry plumbing.

mod error;
mod message;
mod model;
mod prompt;
mod resilience;
mod response;
mod stream;

pub mod prelude {
    //! Common `wprovider` imports for downstream crates.

    pub use crate::{
        ChatModel, ChatResponse, ChatResponseMetadata, Generation, GenerationMetadata, Message,
        ModelError, ModelErrorKind, ModelFuture, Prompt, PromptBuilder, Role, TokenUsage,
    };
}

pub use error::{ModelError, ModelErrorKind};
pub use message::{
    AssistantMessage, Message, PropertyMap, Role, SystemMessage, ToolCall, ToolDefinition,
    ToolMessage, UserMessage,
};
pub use model::{ChatModel, ModelFuture};
pub use prompt::{Prompt, PromptBuilder};
pub use resilience::{
    ModelOperationHooks, NoopOperationHooks, RetryPolicy, RetryingModel, execute_with_retry,
};
pub use response::{
    ChatResponse, ChatResponseMetadata, FinishReason, Generation, GenerationMetadata, TokenUsage,
};
pub use stream::{BoxedResponseStream, ResponseStream, VecResponseStream};
