use serde_json::json;

use super::{ParseFailure, ValidationFailure};
use crate::tooling::{ToolMetadata, ToolResult};

pub const TOOL_CALL_FORMAT: &str = r#"{"tool": "<name>", "args": {...}}"#;
pub const COMPLETION_FORMAT: &str = r#"{"done": true, "response": "<text>"}"#;

pub fn canonical_formats() -> String {
    format!(
        "Valid formats:\n- Tool call: {TOOL_CALL_FORMAT}\n- Completion: {COMPLETION_FORMAT}"
    )
}

/// The system message that opens a conversation.
pub fn compose_system_message(system_prompt: &str, tools: &[ToolMetadata]) -> String {
    let rules = [
        "Respond with exactly one JSON object per turn, with no commentary and no code fences.",
        "To invoke a tool, respond with the tool call format. The result comes back as {\"tool_result\": {\"success\": ..., \"data\": ..., \"error\": ...}}.",
        "When the task is finished, respond with the completion format.",
    ];

    format!(
        "{}\n\n{}\n\n{}\n\n{}",
        system_prompt.trim(),
        rules.join("\n"),
        canonical_formats(),
        render_tool_catalog(tools)
    )
}

pub fn render_tool_catalog(tools: &[ToolMetadata]) -> String {
    if tools.is_empty() {
        return "Available tools: none.".to_string();
    }
    let mut text = String::from("Available tools:");
    for tool in tools {
        text.push_str(&format!("\n- {}: {}", tool.name, tool.description));
        if tool
            .parameters
            .as_object()
            .is_some_and(|params| !params.is_empty())
        {
            text.push_str(&format!("\n  args: {}", tool.parameters));
        }
    }
    text
}

/// Fed back after a response that is not JSON at all.
pub fn parse_error_feedback(failure: &ParseFailure, tools: &[ToolMetadata]) -> String {
    format!(
        "Your previous response could not be parsed as JSON.\n\n{}\n\n{}",
        failure.recovery,
        render_tool_catalog(tools)
    )
}

/// Fed back after well-formed JSON of the wrong shape.
pub fn validation_error_feedback(failure: &ValidationFailure) -> String {
    let problems = failure
        .issues
        .iter()
        .map(|issue| format!("- {issue}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Your previous response was valid JSON but did not match either response format.\n\nProblems:\n{problems}\n\nHow to fix: {}\n\n{}",
        failure.guidance,
        canonical_formats()
    )
}

/// The `{"tool_result": ...}` envelope recorded after a tool call.
pub fn tool_result_envelope(result: &ToolResult) -> String {
    json!({ "tool_result": result }).to_string()
}
