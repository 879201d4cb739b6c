//! Advisor that exposes chat memory to the advisor chain.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use wmemory::{ConversationMemoryAdvisor, InMemoryChatMemory};
//!
//! let advisor = ConversationMemoryAdvisor::new(Arc::new(InMemoryChatMemory::new()))
//!     .with_window(50);
//! assert_eq!(advisor.window(), 50);
//! ```

use std::sync::Arc;

use wchat::{AdvisedRequest, AdvisedResponse, Advisor, ChatError};
use wcommon::{BoxFuture, ConversationId};
use wprovider::{Message, Role};

use crate::memory::{ChatMemory, DEFAULT_CONVERSATION_ID};

const DEFAULT_WINDOW: usize = 100;
const MEMORY_HEADER: &str = "MEMORY:";

/// Injects conversation history into the system message on the way out and
/// appends the turn's messages to the store on the way back.
///
/// The memory block reflects store state as of advise time. The read and
/// the later append are not one transaction: a concurrent writer to the
/// same conversation id between them is last-write-wins, so keep a single
/// writer per conversation id.
pub struct ConversationMemoryAdvisor {
    memory: Arc<dyn ChatMemory>,
    window: usize,
    default_conversation_id: ConversationId,
}

impl ConversationMemoryAdvisor {
    pub fn new(memory: Arc<dyn ChatMemory>) -> Self {
        Self {
            memory,
            window: DEFAULT_WINDOW,
            default_conversation_id: ConversationId::from(DEFAULT_CONVERSATION_ID),
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_default_conversation(
        mut self,
        conversation_id: impl Into<ConversationId>,
    ) -> Self {
        self.default_conversation_id = conversation_id.into();
        self
    }

    pub fn window(&self) -> usize {
        self.window
    }

    fn conversation_id<'a>(&'a self, request_id: Option<&'a ConversationId>) -> &'a ConversationId {
        request_id.unwrap_or(&self.default_conversation_id)
    }
}

impl Advisor for ConversationMemoryAdvisor {
    fn name(&self) -> &str {
        "conversation-memory"
    }

    fn advise_request<'a>(
        &'a self,
        request: AdvisedRequest,
    ) -> BoxFuture<'a, Result<AdvisedRequest, ChatError>> {
        Box::pin(async move {
            let conversation_id = self
                .conversation_id(request.context.conversation_id())
                .clone();
            let history = self.memory.get(&conversation_id, self.window).await?;

            let system_text =
                render_system_with_memory(request.prompt.system_text(), &history);
            Ok(request.map_prompt(|prompt| prompt.with_system_text(system_text)))
        })
    }

    fn advise_response<'a>(
        &'a self,
        response: AdvisedResponse,
    ) -> BoxFuture<'a, Result<AdvisedResponse, ChatError>> {
        Box::pin(async move {
            let conversation_id = self
                .conversation_id(response.context.conversation_id())
                .clone();

            let mut turn_messages: Vec<Message> = response
                .prompt
                .messages()
                .iter()
                .filter(|message| message.role() == Role::User)
                .cloned()
                .collect();

            if let Some(generation) = response.response.first_generation() {
                turn_messages.push(Message::Assistant(generation.message.clone()));
            }

            if !turn_messages.is_empty() {
                self.memory.add(&conversation_id, turn_messages).await?;
            }

            Ok(response)
        })
    }
}

/// Renders prior messages as a flat MEMORY block appended to the system
/// text. Unseen conversations still get the header so downstream prompts
/// keep a stable shape.
fn render_system_with_memory(system_text: Option<&str>, history: &[Message]) -> String {
    let mut block = String::from(MEMORY_HEADER);
    for message in history {
        block.push('\n');
        block.push_str(role_label(message.role()));
        block.push_str(": ");
        block.push_str(message.content());
    }

    match system_text {
        Some(existing) if !existing.is_empty() => format!("{existing}\n\n{block}"),
        _ => block,
    }
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::System => "SYSTEM",
        Role::User => "USER",
        Role::Assistant => "ASSISTANT",
        Role::Tool => "TOOL",
    }
}
