//! Production-friendly observability hooks for model and chain phases.
//!
//! ```rust
//! use wobserve::{MetricsChatHooks, SafeModelHooks, TracingChatHooks};
//!
//! let _model_hooks = SafeModelHooks::new(TracingChatHooks);
//! let _metrics = MetricsChatHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsChatHooks;
pub use safe_hooks::{SafeChatHooks, SafeModelHooks};
pub use tracing_hooks::TracingChatHooks;

pub mod prelude {
    pub use crate::{MetricsChatHooks, SafeChatHooks, SafeModelHooks, TracingChatHooks};
}

#[cfg(test)]
mod tests;
