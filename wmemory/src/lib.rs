//! Conversation transcript persistence with a chat-advisor adapter.

mod advisor;
mod backends;
mod error;
mod memory;

pub mod prelude {
    pub use crate::{
        ChatMemory, ConversationMemoryAdvisor, DEFAULT_CONVERSATION_ID, InMemoryChatMemory,
        MemoryBackendConfig, MemoryError, MemoryErrorKind, SqliteChatMemory, create_chat_memory,
        create_default_chat_memory,
    };
}

pub use advisor::ConversationMemoryAdvisor;
pub use error::{MemoryError, MemoryErrorKind};
pub use memory::{
    ChatMemory, DEFAULT_CONVERSATION_ID, InMemoryChatMemory, MemoryBackendConfig,
    SqliteChatMemory, create_chat_memory, create_default_chat_memory,
};
