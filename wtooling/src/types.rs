//! Tool execution context and result types.

use wcommon::{ConversationId, MetadataMap, TraceId};
use wprovider::{Message, ToolCall};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionContext {
    pub conversation_id: ConversationId,
    pub trace_id: Option<TraceId>,
    pub metadata: MetadataMap,
}

impl ToolExecutionContext {
    pub fn new(conversation_id: impl Into<ConversationId>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            trace_id: None,
            metadata: MetadataMap::new(),
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<TraceId>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionResult {
    pub tool_call_id: String,
    pub output: String,
}

impl ToolExecutionResult {
    pub fn new(tool_call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            output: output.into(),
        }
    }

    pub fn from_call(call: &ToolCall, output: impl Into<String>) -> Self {
        Self::new(call.id.clone(), output)
    }

    /// Converts the result into the tool message fed back to the model.
    pub fn into_tool_message(self) -> Message {
        Message::tool(self.output, self.tool_call_id)
    }
}

#[cfg(test)]
mod tests {
    use wprovider::Role;

    use super::*;

    #[test]
    fn execution_result_converts_into_a_tool_message() {
        let result = ToolExecutionResult::new("call_1", "42");
        let message = result.into_tool_message();

        assert_eq!(message.role(), Role::Tool);
        assert_eq!(message.content(), "42");
    }
}
