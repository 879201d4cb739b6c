//! Advisor chain orchestration over chat models.

mod advisor;
mod client;
mod error;
mod hooks;

pub mod prelude {
    pub use crate::{
        AdvisedRequest, AdvisedResponse, Advisor, AdvisorContext, ChatClient, ChatClientBuilder,
        ChatError, ChatErrorKind, ChatEventStream, ChatRuntimeHooks, ChatStreamEvent,
        NoopChatRuntimeHooks,
    };
}

pub use advisor::{AdvisedRequest, AdvisedResponse, Advisor, AdvisorContext};
pub use client::{ChatClient, ChatClientBuilder, ChatEventStream, ChatStreamEvent};
pub use error::{ChatError, ChatErrorKind};
pub use hooks::{ChatRuntimeHooks, NoopChatRuntimeHooks};

pub use wcommon::{BoxFuture, ConversationId, TraceId};
