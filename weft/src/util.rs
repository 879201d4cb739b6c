//! Small convenience constructors for common types.

use crate::{AdvisorContext, ConversationId, Document, Message, Prompt, Query};

pub fn system_message(content: impl Into<String>) -> Message {
    Message::system(content)
}

pub fn user_message(content: impl Into<String>) -> Message {
    Message::user(content)
}

pub fn assistant_message(content: impl Into<String>) -> Message {
    Message::assistant(content)
}

pub fn tool_message(content: impl Into<String>, tool_call_id: impl Into<String>) -> Message {
    Message::tool(content, tool_call_id)
}

pub fn prompt(user_text: impl Into<String>) -> Prompt {
    Prompt::from_text(user_text)
}

pub fn conversation_context(conversation_id: impl Into<ConversationId>) -> AdvisorContext {
    AdvisorContext::for_conversation(conversation_id)
}

pub fn query(text: impl Into<String>) -> Query {
    Query::new(text)
}

pub fn document(content: impl Into<String>) -> Document {
    Document::new(content)
}

#[cfg(test)]
mod tests {
    use crate::Role;

    use super::{conversation_context, document, prompt, query, tool_message, user_message};

    #[test]
    fn message_and_prompt_helpers_apply_expected_defaults() {
        let message = user_message("hello");
        assert_eq!(message.role(), Role::User);

        let tool = tool_message("output", "call_1");
        assert_eq!(tool.role(), Role::Tool);

        let prompt = prompt("hello");
        assert_eq!(prompt.last_user_text(), Some("hello"));
    }

    #[test]
    fn query_helpers_build_value_types() {
        assert_eq!(query("q").text, "q");
        assert_eq!(document("d").content, "d");
        assert_eq!(
            conversation_context("c1").conversation_id().map(|id| id.as_str()),
            Some("c1")
        );
    }
}
