use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::{Connection, params};
use wcommon::{BoxFuture, ConversationId};
use wprovider::{Message, Role};

use crate::error::MemoryError;
use crate::memory::ChatMemory;

/// Durable transcript store on a single sqlite connection.
///
/// Messages persist as a role column (for inspection) plus the full
/// serde-encoded message payload, ordered by rowid.
#[derive(Debug)]
pub struct SqliteChatMemory {
    connection: Mutex<Connection>,
}

impl SqliteChatMemory {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, MemoryError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|error| {
                MemoryError::storage(format!(
                    "failed to create sqlite parent directory: {error}"
                ))
            })?;
        }

        let connection = Connection::open(path).map_err(|error| {
            MemoryError::storage(format!("failed to open sqlite database: {error}"))
        })?;
        Self::from_connection(connection)
    }

    pub fn new_in_memory() -> Result<Self, MemoryError> {
        let connection = Connection::open_in_memory().map_err(|error| {
            MemoryError::storage(format!("failed to open in-memory sqlite database: {error}"))
        })?;
        Self::from_connection(connection)
    }

    fn from_connection(connection: Connection) -> Result<Self, MemoryError> {
        connection
            .busy_timeout(Duration::from_secs(5))
            .map_err(|error| {
                MemoryError::storage(format!("failed to configure sqlite busy timeout: {error}"))
            })?;
        let store = Self {
            connection: Mutex::new(connection),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, MemoryError> {
        self.connection
            .lock()
            .map_err(|_| MemoryError::storage("sqlite store lock poisoned"))
    }

    fn initialize_schema(&self) -> Result<(), MemoryError> {
        let conn = self.connection()?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            CREATE TABLE IF NOT EXISTS conversation_messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                conversation_id TEXT NOT NULL,
                role TEXT NOT NULL,
                payload_json TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_messages_conversation_id
            ON conversation_messages(conversation_id, id);
            ",
        )
        .map_err(|error| {
            MemoryError::storage(format!("failed to initialize sqlite schema: {error}"))
        })?;

        Ok(())
    }
}

impl ChatMemory for SqliteChatMemory {
    fn get<'a>(
        &'a self,
        conversation_id: &'a ConversationId,
        window: usize,
    ) -> BoxFuture<'a, Result<Vec<Message>, MemoryError>> {
        Box::pin(async move {
            let conn = self.connection()?;
            let mut stmt = conn
                .prepare(
                    "
                    SELECT payload_json
                    FROM conversation_messages
                    WHERE conversation_id = ?1
                    ORDER BY id DESC
                    LIMIT ?2
                    ",
                )
                .map_err(|error| {
                    MemoryError::storage(format!("failed to prepare transcript query: {error}"))
                })?;
            let rows = stmt
                .query_map(
                    params![conversation_id.as_str(), window as i64],
                    |row| row.get::<_, String>(0),
                )
                .map_err(|error| {
                    MemoryError::storage(format!("failed to query transcript rows: {error}"))
                })?;

            let mut messages = Vec::new();
            for row in rows {
                let payload = row.map_err(|error| {
                    MemoryError::storage(format!("failed to read transcript row: {error}"))
                })?;
                let message: Message = serde_json::from_str(&payload).map_err(|error| {
                    MemoryError::storage(format!(
                        "failed to decode transcript message JSON: {error}"
                    ))
                })?;
                messages.push(message);
            }

            // rows arrive newest-first; hand back submission order
            messages.reverse();
            Ok(messages)
        })
    }

    fn add<'a>(
        &'a self,
        conversation_id: &'a ConversationId,
        messages: Vec<Message>,
    ) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            let conn = self.connection()?;
            for message in messages {
                let payload = serde_json::to_string(&message).map_err(|error| {
                    MemoryError::storage(format!(
                        "failed to encode transcript message JSON: {error}"
                    ))
                })?;
                conn.execute(
                    "
                    INSERT INTO conversation_messages (conversation_id, role, payload_json)
                    VALUES (?1, ?2, ?3)
                    ",
                    params![
                        conversation_id.as_str(),
                        role_to_str(message.role()),
                        payload
                    ],
                )
                .map_err(|error| {
                    MemoryError::storage(format!("failed to append transcript message: {error}"))
                })?;
            }
            Ok(())
        })
    }
}

fn role_to_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    }
}

pub(crate) fn default_sqlite_path() -> PathBuf {
    if let Some(explicit) = std::env::var_os("WMEMORY_SQLITE_PATH") {
        return PathBuf::from(explicit);
    }

    if let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
        return PathBuf::from(home).join(".weft").join("wmemory.sqlite3");
    }

    PathBuf::from("wmemory.sqlite3")
}
