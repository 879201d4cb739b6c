//! Immutable prompt value and its builder.
//!
//! ```rust
//! use wprovider::{Message, ModelErrorKind, Prompt};
//!
//! let ok = Prompt::new_validated(vec![Message::user("Summarize this diff")]);
//! assert!(ok.is_ok());
//!
//! let err = Prompt::new_validated(vec![])
//!     .err()
//!     .expect("empty prompt should fail");
//! assert_eq!(err.kind, ModelErrorKind::InvalidRequest);
//! ```

use wcommon::ChatOptions;

use crate::{Message, ModelError, Role, ToolDefinition};

/// Ordered message sequence plus request options, frozen once built.
///
/// Message order is preserved end to end; transforms produce new prompts
/// rather than editing this one.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    messages: Vec<Message>,
    options: ChatOptions,
    tools: Vec<ToolDefinition>,
}

impl Prompt {
    pub fn builder() -> PromptBuilder {
        PromptBuilder::new()
    }

    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            options: ChatOptions::default(),
            tools: Vec::new(),
        }
    }

    pub fn new_validated(messages: Vec<Message>) -> Result<Self, ModelError> {
        let prompt = Self::new(messages);
        prompt.validate()?;
        Ok(prompt)
    }

    pub fn from_text(user_text: impl Into<String>) -> Self {
        Self::new(vec![Message::user(user_text)])
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn options(&self) -> &ChatOptions {
        &self.options
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn system_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|message| message.role() == Role::System)
            .map(Message::content)
    }

    pub fn last_user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.role() == Role::User)
            .map(Message::content)
    }

    /// Returns a new prompt whose first system message carries `text`,
    /// inserting one at the front when the prompt has none.
    pub fn with_system_text(&self, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut messages = self.messages.clone();
        match messages
            .iter()
            .position(|message| message.role() == Role::System)
        {
            Some(index) => {
                if let Message::System(system) = &mut messages[index] {
                    system.content = text;
                }
            }
            None => messages.insert(0, Message::system(text)),
        }

        Self {
            messages,
            options: self.options.clone(),
            tools: self.tools.clone(),
        }
    }

    /// Returns a new prompt whose last user message carries `text`; the
    /// prompt is returned unchanged when it has no user message.
    pub fn with_last_user_text(&self, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut messages = self.messages.clone();
        if let Some(index) = messages
            .iter()
            .rposition(|message| message.role() == Role::User)
            && let Message::User(user) = &mut messages[index]
        {
            user.content = text;
        }

        Self {
            messages,
            options: self.options.clone(),
            tools: self.tools.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.messages.is_empty() {
            return Err(ModelError::invalid_request(
                "at least one message is required",
            ));
        }

        if let Some(model) = &self.options.model
            && model.trim().is_empty()
        {
            return Err(ModelError::invalid_request(
                "model name, when set, must not be empty",
            ));
        }

        if let Some(max_tokens) = self.options.max_tokens
            && max_tokens == 0
        {
            return Err(ModelError::invalid_request(
                "max_tokens must be greater than zero",
            ));
        }

        if let Some(temperature) = self.options.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err(ModelError::invalid_request(
                "temperature must be in the inclusive range 0.0..=2.0",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PromptBuilder {
    messages: Vec<Message>,
    options: ChatOptions,
    tools: Vec<ToolDefinition>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.options.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = Some(max_tokens);
        self
    }

    pub fn options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn tool(mut self, tool: ToolDefinition) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools.extend(tools);
        self
    }

    pub fn streaming(mut self, stream: bool) -> Self {
        self.options.stream = stream;
        self
    }

    pub fn enable_streaming(self) -> Self {
        self.streaming(true)
    }

    pub fn build(self) -> Result<Prompt, ModelError> {
        let prompt = Prompt {
            messages: self.messages,
            options: self.options,
            tools: self.tools,
        };

        prompt.validate()?;
        Ok(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelErrorKind;

    #[test]
    fn builder_collects_messages_in_submission_order() {
        let prompt = Prompt::builder()
            .message(Message::system("be concise"))
            .message(Message::user("first"))
            .message(Message::user("second"))
            .model("gpt-4o-mini")
            .build()
            .expect("prompt should build");

        let roles: Vec<_> = prompt.messages().iter().map(Message::role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::User]);
        assert_eq!(prompt.last_user_text(), Some("second"));
        assert_eq!(prompt.system_text(), Some("be concise"));
    }

    #[test]
    fn validation_rejects_bad_option_values() {
        let empty = Prompt::new_validated(vec![]).expect_err("no messages should fail");
        assert_eq!(empty.kind, ModelErrorKind::InvalidRequest);

        let bad_temperature = Prompt::builder()
            .message(Message::user("hi"))
            .temperature(9.0)
            .build()
            .expect_err("temperature out of range should fail");
        assert_eq!(bad_temperature.kind, ModelErrorKind::InvalidRequest);

        let zero_tokens = Prompt::builder()
            .message(Message::user("hi"))
            .max_tokens(0)
            .build()
            .expect_err("zero max_tokens should fail");
        assert_eq!(zero_tokens.kind, ModelErrorKind::InvalidRequest);
    }

    #[test]
    fn with_system_text_replaces_or_inserts_front_system_message() {
        let without_system = Prompt::new(vec![Message::user("question")]);
        let inserted = without_system.with_system_text("context");
        assert_eq!(inserted.messages()[0], Message::system("context"));
        assert_eq!(inserted.messages().len(), 2);

        let replaced = inserted.with_system_text("new context");
        assert_eq!(replaced.system_text(), Some("new context"));
        assert_eq!(replaced.messages().len(), 2);

        // source prompts are untouched
        assert_eq!(without_system.messages().len(), 1);
    }

    #[test]
    fn with_last_user_text_rewrites_only_the_last_user_message() {
        let prompt = Prompt::new(vec![
            Message::user("original question"),
            Message::assistant("answer"),
            Message::user("follow-up"),
        ]);

        let rewritten = prompt.with_last_user_text("augmented follow-up");
        assert_eq!(rewritten.last_user_text(), Some("augmented follow-up"));
        assert_eq!(rewritten.messages()[0].content(), "original question");
        assert_eq!(prompt.last_user_text(), Some("follow-up"));
    }
}
