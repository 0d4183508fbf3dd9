use serde_json::{Map, Value, json};
use std::sync::LazyLock;
use thiserror::Error;

use super::super::directive::{Completion, ParsedResponse};
use crate::tooling::{FieldIssue, FieldKind, ObjectSchema, ToolCall};

static COMPLETION_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new()
        .required("done", FieldKind::Literal(json!(true)), "Always true")
        .required("response", FieldKind::String, "Final answer for the user")
});

static TOOL_CALL_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new()
        .required("tool", FieldKind::String, "Name of the tool to invoke")
        .required("args", FieldKind::Object, "Arguments for the tool")
});

/// Well-formed JSON that is neither a tool call nor a completion.
///
/// `issues` are the tool-call diagnostics; `guidance` is the single most
/// specific hint derived from the fields that were present.
#[derive(Debug, Clone, Error)]
#[error("response matches neither the tool call nor the completion format: {}", join_issues(.issues))]
pub struct ValidationFailure {
    pub issues: Vec<FieldIssue>,
    pub guidance: String,
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Classifies a parsed value. Completion is tried first so `done: true`
/// always wins over a tool-call reading.
pub fn validate_response(value: &Value) -> Result<ParsedResponse, ValidationFailure> {
    if let Ok(mut fields) = COMPLETION_SCHEMA.validate(value) {
        if let Some(Value::String(response)) = fields.remove("response") {
            return Ok(ParsedResponse::Completion(Completion { response }));
        }
    }

    match TOOL_CALL_SCHEMA.validate(value) {
        Ok(mut fields) => match (fields.remove("tool"), fields.remove("args")) {
            (Some(Value::String(tool)), Some(Value::Object(args))) => {
                Ok(ParsedResponse::ToolCall(ToolCall::new(tool, args)))
            }
            _ => Err(ValidationFailure {
                issues: Vec::new(),
                guidance: guidance_for(value),
            }),
        },
        Err(issues) => Err(ValidationFailure {
            issues,
            guidance: guidance_for(value),
        }),
    }
}

fn guidance_for(value: &Value) -> String {
    let Some(object) = value.as_object() else {
        return "Respond with a JSON object, not a bare value or array.".into();
    };
    specific_guidance(object)
        .unwrap_or("Make sure the response matches exactly one of the two formats.")
        .to_string()
}

fn specific_guidance(object: &Map<String, Value>) -> Option<&'static str> {
    let has = |key: &str| object.contains_key(key);

    if has("tool") && has("done") {
        return Some("Remove either \"tool\" or \"done\": a response is a tool call or a completion, never both.");
    }
    if !has("tool") && !has("done") {
        return Some("Include either a \"tool\" field (to call a tool) or \"done\": true (to finish).");
    }
    if has("done") && !has("response") {
        return Some("Add a \"response\" field with your final answer next to \"done\": true.");
    }
    if has("tool") && !has("args") {
        return Some("Add an \"args\" field; use {} when the tool takes no arguments.");
    }
    if has("args") && !object.get("args").is_some_and(Value::is_object) {
        return Some("Change \"args\" to a JSON object, for example {\"path\": \"notes.txt\"}.");
    }
    if object.len() > 2 {
        return Some("Remove extra fields; only \"tool\"/\"args\" or \"done\"/\"response\" are allowed.");
    }
    if has("done") && object.get("done") != Some(&Value::Bool(true)) {
        return Some("Set \"done\" to true; it is a marker, not a flag.");
    }
    None
}
