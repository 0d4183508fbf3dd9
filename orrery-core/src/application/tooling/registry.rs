use futures::FutureExt;
use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::error::ToolError;
use super::interface::{Tool, ToolCall, ToolMetadata, ToolResult};

/// Name-keyed table of tools.
///
/// Lookups never raise: an unknown tool, arguments that fail the schema and
/// errors or panics from a tool body all come back as a failed
/// [`ToolResult`] the model can read and react to.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T>(&mut self, tool: T) -> Result<(), ToolError>
    where
        T: Tool + 'static,
    {
        self.register_shared(Arc::new(tool))
    }

    pub fn register_shared(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            warn!(tool = %name, "Rejected duplicate tool registration");
            return Err(ToolError::AlreadyRegistered { name });
        }
        debug!(tool = %name, "Registered tool");
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Public metadata in registration order.
    pub fn list(&self) -> Vec<ToolMetadata> {
        self.tools.iter().map(|tool| tool.metadata()).collect()
    }

    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        let Some(tool) = self.index.get(&call.tool).map(|&slot| &self.tools[slot]) else {
            warn!(requested_tool = %call.tool, "Unknown tool requested by agent");
            return ToolResult::failure(format!("tool '{}' not found", call.tool));
        };

        let args = match tool.schema().validate(&serde_json::Value::Object(call.args.clone())) {
            Ok(args) => args,
            Err(issues) => {
                let details = issues
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                warn!(tool = %call.tool, %details, "Tool arguments rejected by schema");
                return ToolResult::failure(format!(
                    "invalid arguments for tool '{}': {details}",
                    call.tool
                ));
            }
        };

        debug!(tool = %call.tool, "Dispatching tool");
        let result = match AssertUnwindSafe(tool.execute(args)).catch_unwind().await {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                warn!(tool = %call.tool, error = %err, "Tool execution failed");
                ToolResult::failure(format!("tool '{}' failed: {err}", call.tool))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(tool = %call.tool, %message, "Tool panicked");
                ToolResult::failure(format!("tool '{}' failed: panicked: {message}", call.tool))
            }
        };
        info!(tool = %call.tool, success = result.success(), "Tool executed");
        result
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}
