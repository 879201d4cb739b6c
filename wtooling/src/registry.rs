//! Tool registry for lookup by definition name and call dispatch.

use std::future::Future;
use std::sync::Arc;

use wcommon::Registry;
use wprovider::{ToolCall, ToolDefinition};

use crate::{FunctionTool, Tool, ToolError, ToolExecutionContext, ToolExecutionResult};

#[derive(Default)]
pub struct ToolRegistry {
    tools: Registry<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        let name = tool.definition().name;
        self.tools.insert(name, Arc::new(tool));
    }

    pub fn register_fn<F, Fut>(&mut self, definition: ToolDefinition, handler: F)
    where
        F: Fn(String, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        self.register(FunctionTool::new(definition, handler));
    }

    pub fn register_sync_fn<F>(&mut self, definition: ToolDefinition, handler: F)
    where
        F: Fn(String, ToolExecutionContext) -> Result<String, ToolError> + Send + Sync + 'static,
    {
        self.register_fn(definition, move |args_json, context| {
            let output = handler(args_json, context);
            async move { output }
        });
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.remove(name)
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|tool| tool.definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Executes one assistant tool-call request against the registry.
    pub async fn dispatch(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
    ) -> Result<ToolExecutionResult, ToolError> {
        let Some(tool) = self.get(&tool_call.name) else {
            return Err(ToolError::not_found(format!(
                "no tool registered under '{}'",
                tool_call.name
            ))
            .with_tool_name(tool_call.name.clone())
            .with_tool_call_id(tool_call.id.clone()));
        };

        let output = tool
            .invoke(&tool_call.arguments, context)
            .await
            .map_err(|error| {
                error
                    .with_tool_name(tool_call.name.clone())
                    .with_tool_call_id(tool_call.id.clone())
            })?;

        Ok(ToolExecutionResult::from_call(tool_call, output))
    }
}

#[cfg(test)]
mod tests {
    use crate::{ToolErrorKind, parse_json_object, required_string};

    use super::*;

    fn echo_definition() -> ToolDefinition {
        ToolDefinition {
            name: "echo".to_string(),
            description: "Echoes the text argument".to_string(),
            input_schema: r#"{"type":"object","properties":{"text":{"type":"string"}}}"#
                .to_string(),
        }
    }

    #[tokio::test]
    async fn registered_functions_dispatch_by_call_name() {
        let mut registry = ToolRegistry::new();
        registry.register_fn(echo_definition(), |args_json, _context| async move {
            let args = parse_json_object(&args_json)?;
            required_string(&args, "text")
        });

        let call = ToolCall {
            id: "call_1".to_string(),
            name: "echo".to_string(),
            arguments: r#"{"text":"hello"}"#.to_string(),
        };
        let context = ToolExecutionContext::new("conversation-1");

        let result = registry
            .dispatch(&call, &context)
            .await
            .expect("dispatch should work");
        assert_eq!(result, ToolExecutionResult::new("call_1", "hello"));
    }

    #[tokio::test]
    async fn sync_registration_wraps_into_the_async_path() {
        let mut registry = ToolRegistry::new();
        registry.register_sync_fn(echo_definition(), |args_json, _context| Ok(args_json));

        let call = ToolCall {
            id: "call_2".to_string(),
            name: "echo".to_string(),
            arguments: "raw".to_string(),
        };
        let context = ToolExecutionContext::new("conversation-1");

        let result = registry
            .dispatch(&call, &context)
            .await
            .expect("dispatch should work");
        assert_eq!(result.output, "raw");
    }

    #[tokio::test]
    async fn unknown_tools_report_not_found_with_call_details() {
        let registry = ToolRegistry::new();
        let call = ToolCall {
            id: "call_3".to_string(),
            name: "missing".to_string(),
            arguments: "{}".to_string(),
        };
        let context = ToolExecutionContext::new("conversation-1");

        let error = registry
            .dispatch(&call, &context)
            .await
            .expect_err("dispatch should fail");

        assert_eq!(error.kind, ToolErrorKind::NotFound);
        assert_eq!(error.tool_name.as_deref(), Some("missing"));
        assert_eq!(error.tool_call_id.as_deref(), Some("call_3"));
    }

    #[test]
    fn definitions_surface_for_prompt_attachment() {
        let mut registry = ToolRegistry::new();
        registry.register_sync_fn(echo_definition(), |args_json, _context| Ok(args_json));

        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name, "echo");
    }
}
