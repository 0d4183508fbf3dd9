// Response protocol tests - stripping, parsing and shape validation
//
// Properties the agent loop relies on when it turns raw model text into a
// tool call or a completion.

use orrery_core::agent::ParsedResponse;
use orrery_core::agent::runtime::{parse_response, strip_markdown, validate_response};
use serde_json::{Value, json};

fn classify(raw: &str) -> Option<ParsedResponse> {
    let value = parse_response(raw).ok()?;
    validate_response(&value).ok()
}

#[test]
fn tool_calls_survive_parse_and_validate_unchanged() {
    let cases = [
        json!({"tool": "read_file", "args": {"path": "a.txt"}}),
        json!({"tool": "calculator", "args": {"operation": "add", "a": 1, "b": 2.5}}),
        json!({"tool": "noop", "args": {}}),
        json!({"tool": "nested", "args": {"filter": {"tags": ["x", "y"], "limit": null}}}),
    ];

    for case in cases {
        let raw = case.to_string();
        match classify(&raw) {
            Some(ParsedResponse::ToolCall(call)) => {
                assert_eq!(call.tool, case["tool"].as_str().unwrap());
                assert_eq!(Value::Object(call.args), case["args"]);
            }
            other => panic!("{raw} classified as {other:?}"),
        }
    }
}

#[test]
fn stripping_is_idempotent_across_fence_depths() {
    let body = r#"{"done": true, "response": "ok"}"#;
    let inputs = [
        body.to_string(),
        format!("  \n{body}\n\t "),
        format!("```\n{body}\n```"),
        format!("```json\n{body}\n```"),
        format!("```json{body}```"),
        format!("```json\n```json\n{body}\n```\n```"),
        format!("\n\n```JSON\n  {body}  \n```\n\n"),
    ];

    for input in inputs {
        let once = strip_markdown(&input);
        assert_eq!(strip_markdown(&once), once, "not idempotent for {input:?}");
        assert_eq!(once, body, "unexpected strip result for {input:?}");
    }
}

#[test]
fn both_tool_and_done_are_never_accepted() {
    let payloads = [
        json!({"done": true, "tool": "x"}),
        json!({"done": true, "response": "r", "tool": "x", "args": {}}),
        json!({"tool": "x", "args": {}, "done": true}),
    ];
    for payload in payloads {
        assert!(validate_response(&payload).is_err(), "accepted {payload}");
    }
}

#[test]
fn done_true_is_always_a_completion() {
    match classify(r#"{"done": true, "response": "{\"tool\": \"x\", \"args\": {}}"}"#) {
        Some(ParsedResponse::Completion(completion)) => {
            assert_eq!(completion.response, r#"{"tool": "x", "args": {}}"#);
        }
        other => panic!("unexpected classification: {other:?}"),
    }
}

#[test]
fn done_false_is_rejected() {
    let failure = validate_response(&json!({"done": false, "response": "x"})).unwrap_err();
    assert!(!failure.issues.is_empty());
}

#[test]
fn tool_schema_diagnostics_name_fields_and_types() {
    let failure = validate_response(&json!({"tool": 7, "args": "nope"})).unwrap_err();
    let rendered: Vec<String> = failure.issues.iter().map(ToString::to_string).collect();
    assert!(rendered.iter().any(|issue| issue.starts_with("tool:") && issue.contains("number")));
    assert!(rendered.iter().any(|issue| issue.starts_with("args:") && issue.contains("string")));
}

#[test]
fn parse_failures_explain_how_to_recover() {
    let failure = parse_response("{\"tool\": \"x\", \"args\": {}").unwrap_err();
    assert!(failure.recovery.contains("line 1"));
    assert!(failure.recovery.contains("Valid formats:"));

    let empty = parse_response("```json\n```").unwrap_err();
    assert!(empty.stripped.is_empty());
    assert!(empty.recovery.contains("The response was empty."));
}
