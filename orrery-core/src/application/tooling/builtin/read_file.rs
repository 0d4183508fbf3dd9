use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use crate::tooling::{FieldKind, ObjectSchema, Tool, ToolExecutionError, ToolResult};

#[derive(Debug, Deserialize)]
struct ReadFileArgs {
    path: String,
    max_bytes: Option<u64>,
}

/// Reads UTF-8 text files that live beneath a fixed root directory.
pub struct ReadFileTool {
    root: PathBuf,
    schema: ObjectSchema,
}

impl ReadFileTool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            schema: ObjectSchema::new()
                .required(
                    "path",
                    FieldKind::String,
                    "Path of the file, relative to the readable directory",
                )
                .optional(
                    "max_bytes",
                    FieldKind::Integer,
                    "Truncate the returned content to this many bytes",
                )
                .coerce_primitives(),
        }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the text content of a file."
    }

    fn schema(&self) -> &ObjectSchema {
        &self.schema
    }

    async fn execute(&self, args: Map<String, Value>) -> Result<ToolResult, ToolExecutionError> {
        let args: ReadFileArgs = serde_json::from_value(Value::Object(args))
            .map_err(|err| ToolExecutionError::InvalidInput(err.to_string()))?;

        // Errors name paths relative to the root; the absolute location of
        // the readable directory never reaches the conversation.
        let root = fs::canonicalize(&self.root)
            .await
            .map_err(|source| ToolExecutionError::io(".", source))?;
        let resolved = fs::canonicalize(root.join(&args.path))
            .await
            .map_err(|source| ToolExecutionError::io(&args.path, source))?;

        if !resolved.starts_with(&root) {
            return Ok(ToolResult::failure(format!(
                "path '{}' is outside the readable directory",
                args.path
            )));
        }

        let mut content = fs::read_to_string(&resolved)
            .await
            .map_err(|source| ToolExecutionError::io(&args.path, source))?;
        let bytes = content.len();
        let limit = args
            .max_bytes
            .map(|limit| usize::try_from(limit).unwrap_or(usize::MAX));
        let truncated = match limit {
            Some(limit) if limit < bytes => {
                let mut cut = limit;
                while !content.is_char_boundary(cut) {
                    cut -= 1;
                }
                content.truncate(cut);
                true
            }
            _ => false,
        };

        debug!(path = %resolved.display(), bytes, truncated, "Read file for agent");
        Ok(ToolResult::ok(json!({
            "path": args.path,
            "content": content,
            "bytes": bytes,
            "truncated": truncated,
        })))
    }
}
