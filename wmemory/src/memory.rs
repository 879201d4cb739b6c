//! Chat memory contract and in-memory store implementation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use wcommon::{BoxFuture, ConversationId};
use wprovider::Message;

use crate::backends::sqlite::default_sqlite_path;
use crate::error::MemoryError;

pub use crate::backends::sqlite::SqliteChatMemory;

/// Conversation id used when a caller never names one.
pub const DEFAULT_CONVERSATION_ID: &str = "default";

/// Per-conversation append-only message log.
///
/// Entries for a conversation id are strictly appended in call order; no
/// reordering and no dedup. Individual `get` and `add` calls are serialized
/// by the implementation, but nothing coordinates a read-then-append
/// sequence across callers: concurrent writers to one conversation id are
/// last-write-wins, so keep a single writer per conversation id.
pub trait ChatMemory: Send + Sync {
    /// Loads at most the last `window` messages, oldest first.
    fn get<'a>(
        &'a self,
        conversation_id: &'a ConversationId,
        window: usize,
    ) -> BoxFuture<'a, Result<Vec<Message>, MemoryError>>;

    fn add<'a>(
        &'a self,
        conversation_id: &'a ConversationId,
        messages: Vec<Message>,
    ) -> BoxFuture<'a, Result<(), MemoryError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryBackendConfig {
    Sqlite { path: PathBuf },
    InMemory,
}

impl Default for MemoryBackendConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: default_sqlite_path(),
        }
    }
}

pub fn create_chat_memory(
    config: MemoryBackendConfig,
) -> Result<Arc<dyn ChatMemory>, MemoryError> {
    match config {
        MemoryBackendConfig::Sqlite { path } => Ok(Arc::new(SqliteChatMemory::new(path)?)),
        MemoryBackendConfig::InMemory => Ok(Arc::new(InMemoryChatMemory::new())),
    }
}

pub fn create_default_chat_memory() -> Result<Arc<dyn ChatMemory>, MemoryError> {
    create_chat_memory(MemoryBackendConfig::default())
}

/// Plain map-backed store. Entries persist for the process lifetime; there
/// is no TTL and no eviction.
#[derive(Debug, Default)]
pub struct InMemoryChatMemory {
    conversations: Mutex<HashMap<ConversationId, Vec<Message>>>,
}

impl InMemoryChatMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChatMemory for InMemoryChatMemory {
    fn get<'a>(
        &'a self,
        conversation_id: &'a ConversationId,
        window: usize,
    ) -> BoxFuture<'a, Result<Vec<Message>, MemoryError>> {
        Box::pin(async move {
            let conversations = self
                .conversations
                .lock()
                .map_err(|_| MemoryError::storage("chat memory lock poisoned"))?;

            let Some(messages) = conversations.get(conversation_id) else {
                return Ok(Vec::new());
            };

            let start = messages.len().saturating_sub(window);
            Ok(messages[start..].to_vec())
        })
    }

    fn add<'a>(
        &'a self,
        conversation_id: &'a ConversationId,
        messages: Vec<Message>,
    ) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            let mut conversations = self
                .conversations
                .lock()
                .map_err(|_| MemoryError::storage("chat memory lock poisoned"))?;

            conversations
                .entry(conversation_id.clone())
                .or_default()
                .extend(messages);

            Ok(())
        })
    }
}
