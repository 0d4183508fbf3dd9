use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use super::error::ToolExecutionError;
use super::schema::ObjectSchema;

/// A request from the model to run one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCall {
    pub tool: String,
    pub args: Map<String, Value>,
}

impl ToolCall {
    pub fn new(tool: impl Into<String>, args: Map<String, Value>) -> Self {
        Self {
            tool: tool.into(),
            args,
        }
    }
}

/// The public face of a tool: what the prompt layer is allowed to see.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolMetadata {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Outcome of a tool run. `error` is present exactly when `success` is false.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ToolResult {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// A named, schema-checked operation the model may invoke.
///
/// `execute` only ever sees arguments that passed [`Tool::schema`]. An `Err`
/// (or a panic) is reported to the model as a failed result; an
/// application-level failure should be returned as `Ok(ToolResult::failure)`.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn schema(&self) -> &ObjectSchema;

    async fn execute(&self, args: Map<String, Value>) -> Result<ToolResult, ToolExecutionError>;

    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.schema().parameters(),
        }
    }
}
