use serde_json::Value;
use thiserror::Error;

use super::instructions::canonical_formats;

const FENCE: &str = "```";
const CONTEXT_RADIUS: usize = 24;

/// The model's text could not be read as JSON.
#[derive(Debug, Error)]
#[error("response is not valid JSON: {source}")]
pub struct ParseFailure {
    /// The text after markdown stripping, as handed to the JSON parser.
    pub stripped: String,
    #[source]
    pub source: serde_json::Error,
    /// Guidance for the model: where it broke, usual fixes, valid formats.
    pub recovery: String,
}

/// Removes code-fence wrapping and surrounding whitespace.
///
/// Handles fences with or without a language tag, with or without a trailing
/// newline, and repeated or nested fences. Stripping is idempotent.
pub fn strip_markdown(raw: &str) -> String {
    let mut current = raw.trim();
    loop {
        let next = strip_fence_once(current);
        if next.len() == current.len() {
            return current.to_string();
        }
        current = next;
    }
}

fn strip_fence_once(text: &str) -> &str {
    let mut text = text;
    if let Some(rest) = text.strip_prefix(FENCE) {
        text = skip_language_tag(rest);
    }
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }
    text.trim()
}

/// Drops an info string such as `json` right after an opening fence. A tag
/// only counts when it runs up to a line break or straight into a JSON
/// opener, so fenced bare values are left alone.
fn skip_language_tag(rest: &str) -> &str {
    let tag_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    if tag_len == 0 {
        return rest;
    }
    match rest[tag_len..].chars().next() {
        Some('\n' | '\r' | ' ' | '\t' | '{' | '[') => &rest[tag_len..],
        _ => rest,
    }
}

/// Strips markdown and parses the remainder as JSON.
pub fn parse_response(raw: &str) -> Result<Value, ParseFailure> {
    let stripped = strip_markdown(raw);
    serde_json::from_str(&stripped).map_err(|source| {
        let recovery = recovery_message(&stripped, &source);
        ParseFailure {
            stripped,
            source,
            recovery,
        }
    })
}

fn recovery_message(stripped: &str, error: &serde_json::Error) -> String {
    let mut sections = Vec::new();

    if stripped.is_empty() {
        sections.push("The response was empty.".to_string());
    } else {
        let mut location = format!(
            "JSON syntax error at line {}, column {}: {error}",
            error.line(),
            error.column()
        );
        if let Some(context) = error_context(stripped, error.line(), error.column()) {
            location.push('\n');
            location.push_str(&context);
        }
        sections.push(location);
    }

    sections.push(
        [
            "Common fixes:",
            "- Put every key in double quotes (\"tool\", not tool).",
            "- Remove trailing commas before } or ].",
            "- Make sure the JSON is complete: every { and [ needs its closing } or ].",
        ]
        .join("\n"),
    );
    sections.push(canonical_formats());
    sections.join("\n\n")
}

/// Renders the text around a 1-based line/column position with a caret
/// under the offending character. `column` counts bytes, as serde_json
/// reports it.
fn error_context(text: &str, line: usize, column: usize) -> Option<String> {
    if line == 0 {
        return None;
    }
    let line_text = text.lines().nth(line - 1)?;
    let byte_offset = column.saturating_sub(1);
    let chars: Vec<char> = line_text.chars().collect();
    let position = line_text
        .char_indices()
        .take_while(|(index, _)| *index < byte_offset)
        .count();
    let start = position.saturating_sub(CONTEXT_RADIUS);
    let end = (position + CONTEXT_RADIUS).min(chars.len());

    let prefix = if start > 0 { "..." } else { "" };
    let suffix = if end < chars.len() { "..." } else { "" };
    let snippet: String = chars[start..end].iter().collect();
    let caret_offset = prefix.len() + (position - start);

    Some(format!(
        "Near: {prefix}{snippet}{suffix}\n      {}^",
        " ".repeat(caret_offset)
    ))
}
