//! # Tooling
//!
//! Named, schema-checked operations the agent can invoke, and the
//! [`ToolRegistry`] that dispatches them.

pub mod builtin;
mod error;
mod interface;
mod registry;
mod schema;

pub use error::{ToolError, ToolExecutionError};
pub use interface::{Tool, ToolCall, ToolMetadata, ToolResult};
pub use registry::ToolRegistry;
pub use schema::{FieldIssue, FieldKind, FieldSpec, ObjectSchema, ROOT_PATH, json_type_name};
