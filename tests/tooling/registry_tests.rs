// Tool registry tests - registration, dispatch and failure reporting

use async_trait::async_trait;
use orrery_core::tooling::builtin::CalculatorTool;
use orrery_core::tooling::{
    FieldKind, ObjectSchema, Tool, ToolCall, ToolError, ToolExecutionError, ToolRegistry,
    ToolResult,
};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct CountingTool {
    name: &'static str,
    schema: ObjectSchema,
    calls: Arc<AtomicUsize>,
}

impl CountingTool {
    fn new(name: &'static str, calls: Arc<AtomicUsize>) -> Self {
        Self {
            name,
            schema: ObjectSchema::new().required("text", FieldKind::String, "Text to echo"),
            calls,
        }
    }
}

#[async_trait]
impl Tool for CountingTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "Echo the text back"
    }

    fn schema(&self) -> &ObjectSchema {
        &self.schema
    }

    async fn execute(&self, args: Map<String, Value>) -> Result<ToolResult, ToolExecutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match args.get("text").and_then(Value::as_str) {
            Some("explode") => panic!("echo exploded"),
            Some("refuse") => Err(ToolExecutionError::Failed("refused to echo".into())),
            Some(text) => Ok(ToolResult::ok(json!({ "echo": text }))),
            None => Ok(ToolResult::ok_empty()),
        }
    }
}

fn call(tool: &str, args: Value) -> ToolCall {
    let Value::Object(args) = args else {
        panic!("args must be an object");
    };
    ToolCall::new(tool, args)
}

fn registry() -> (ToolRegistry, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = ToolRegistry::new();
    registry
        .register(CountingTool::new("echo", calls.clone()))
        .unwrap();
    registry.register(CalculatorTool::new()).unwrap();
    (registry, calls)
}

#[test]
fn duplicate_names_are_rejected_and_first_registration_kept() {
    let (mut registry, calls) = registry();
    let err = registry
        .register(CountingTool::new("echo", calls))
        .unwrap_err();
    assert!(matches!(err, ToolError::AlreadyRegistered { ref name } if name == "echo"));
    assert_eq!(registry.len(), 2);
}

#[test]
fn list_follows_registration_order_and_hides_internals() {
    let (registry, _) = registry();
    let listed = registry.list();
    let names: Vec<&str> = listed.iter().map(|tool| tool.name.as_str()).collect();
    assert_eq!(names, vec!["echo", "calculator"]);

    let rendered = serde_json::to_value(&listed[0]).unwrap();
    let keys: Vec<&String> = rendered.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 3);
    assert_eq!(rendered["parameters"]["text"], "string (required): Text to echo");
}

#[tokio::test]
async fn unknown_tool_is_a_failed_result() {
    let (registry, calls) = registry();
    let result = registry.execute(&call("weather", json!({}))).await;
    assert!(!result.success());
    assert_eq!(result.error(), Some("tool 'weather' not found"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn schema_failures_skip_execution() {
    let (registry, calls) = registry();
    let result = registry
        .execute(&call("echo", json!({"text": 5, "extra": true})))
        .await;
    let error = result.error().unwrap();
    assert!(error.starts_with("invalid arguments for tool 'echo':"));
    assert!(error.contains("text: expected string"));
    assert!(error.contains("extra: unrecognized field"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn execution_errors_and_panics_are_contained() {
    let (registry, calls) = registry();

    let refused = registry
        .execute(&call("echo", json!({"text": "refuse"})))
        .await;
    assert_eq!(refused.error(), Some("tool 'echo' failed: refused to echo"));

    let exploded = registry
        .execute(&call("echo", json!({"text": "explode"})))
        .await;
    assert_eq!(
        exploded.error(),
        Some("tool 'echo' failed: panicked: echo exploded")
    );

    let echoed = registry.execute(&call("echo", json!({"text": "hi"}))).await;
    assert_eq!(echoed.data(), Some(&json!({"echo": "hi"})));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn application_failures_pass_through_unchanged() {
    let (registry, _) = registry();
    let result = registry
        .execute(&call(
            "calculator",
            json!({"operation": "divide", "a": 1, "b": 0}),
        ))
        .await;
    assert_eq!(result, ToolResult::failure("division by zero"));
}
