//! Streaming response contracts and in-memory stream utilities.
//!
//! ```rust
//! use wprovider::{BoxedResponseStream, ChatResponse, VecResponseStream};
//!
//! let stream = VecResponseStream::new(vec![Ok(ChatResponse::from_text("m", "hello"))]);
//! let _boxed: BoxedResponseStream<'static> = Box::pin(stream);
//! ```

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use crate::{ChatResponse, ModelError};

/// Model stream contract.
///
/// Invariants for consumers:
/// - Chunks are emitted in source order; concatenating the first
///   generation's text across chunks reconstructs the full reply.
/// - A chunk carrying a finish reason or non-zero usage, when present,
///   arrives last.
/// - Once the stream yields `None`, it must not yield additional items.
/// - The stream is finite and not restartable.
pub trait ResponseStream: Stream<Item = Result<ChatResponse, ModelError>> + Send {}

impl<T> ResponseStream for T where T: Stream<Item = Result<ChatResponse, ModelError>> + Send {}

pub type BoxedResponseStream<'a> = Pin<Box<dyn ResponseStream + 'a>>;

#[derive(Debug)]
pub struct VecResponseStream {
    chunks: VecDeque<Result<ChatResponse, ModelError>>,
}

impl VecResponseStream {
    pub fn new(chunks: Vec<Result<ChatResponse, ModelError>>) -> Self {
        Self {
            chunks: chunks.into(),
        }
    }
}

impl Stream for VecResponseStream {
    type Item = Result<ChatResponse, ModelError>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<ChatResponse, ModelError>>> {
        Poll::Ready(self.chunks.pop_front())
    }
}
