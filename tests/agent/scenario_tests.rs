// Agent scenario tests - full runs through the public API
//
// A scripted model drives the loop against real stores and the built-in
// tools; the assertions look at the result, the metrics and the stored log.

use async_trait::async_trait;
use orrery_core::agent::{Agent, AgentError, AgentOptions, AgentSettings};
use orrery_core::model::{ModelError, ModelProvider, ModelRequest, ModelResponse};
use orrery_core::tooling::{ToolRegistry, builtin};
use orrery_session::{ConversationStore, FileConversationStore, InMemoryConversationStore, MessageRole};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

#[derive(Clone)]
struct Script {
    replies: Arc<Mutex<Vec<String>>>,
    seen: Arc<Mutex<Vec<usize>>>,
}

impl Script {
    fn new(replies: &[&str]) -> Self {
        let mut replies: Vec<String> = replies.iter().map(|r| r.to_string()).collect();
        replies.reverse();
        Self {
            replies: Arc::new(Mutex::new(replies)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Message counts of every request received.
    fn seen(&self) -> Vec<usize> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for Script {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        self.seen.lock().unwrap().push(request.messages.len());
        let reply = self.replies.lock().unwrap().pop();
        reply
            .map(|content| ModelResponse::new(content, request.session_id))
            .ok_or_else(|| ModelError::invalid_response("script", "no more replies"))
    }
}

fn registry(root: &Path) -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    builtin::register_builtin_tools(&mut registry, root).expect("builtins register");
    Arc::new(registry)
}

fn settings() -> AgentSettings {
    AgentSettings::new("script", "scripted-model").with_system_prompt("Solve the task.")
}

fn options(id: &str) -> AgentOptions {
    AgentOptions {
        conversation_id: Some(id.to_string()),
        ..AgentOptions::default()
    }
}

#[tokio::test]
async fn reads_a_file_then_answers() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("notes.txt"), "the answer is 42").expect("write notes");

    let script = Script::new(&[
        r#"{"tool": "read_file", "args": {"path": "notes.txt"}}"#,
        r#"{"done": true, "response": "42"}"#,
    ]);
    let store = Arc::new(InMemoryConversationStore::new());
    let agent = Agent::new(script.clone(), store.clone(), registry(dir.path()), settings());

    let result = agent.run("What is in notes.txt?", options("notes")).await;

    assert_eq!(result.response(), Some("42"));
    assert_eq!(result.metrics.iterations, 2);
    assert_eq!(result.metrics.tool_calls, 1);
    assert_eq!(script.seen(), vec![2, 3]);

    let messages = store.messages("notes").expect("messages");
    let envelope: Value = serde_json::from_str(&messages[2].content).expect("envelope is JSON");
    assert_eq!(envelope["tool_result"]["success"], true);
    assert_eq!(envelope["tool_result"]["data"]["content"], "the answer is 42");
}

#[tokio::test]
async fn escaping_the_read_root_is_a_tool_failure() {
    let dir = tempdir().expect("tempdir");
    let script = Script::new(&[
        r#"{"tool": "read_file", "args": {"path": "../../etc/passwd"}}"#,
        r#"{"done": true, "response": "cannot read it"}"#,
    ]);
    let agent = Agent::new(
        script,
        Arc::new(InMemoryConversationStore::new()),
        registry(dir.path()),
        settings(),
    );

    let result = agent.run("Read the password file", AgentOptions::default()).await;

    assert!(result.success());
    assert_eq!(result.metrics.tool_failures, 1);
}

#[tokio::test]
async fn calculator_arguments_are_coerced() {
    let dir = tempdir().expect("tempdir");
    let script = Script::new(&[
        r#"{"tool": "calculator", "args": {"operation": "power", "a": "2", "b": "10"}}"#,
        r#"{"done": true, "response": "1024"}"#,
    ]);
    let store = Arc::new(InMemoryConversationStore::new());
    let agent = Agent::new(script, store.clone(), registry(dir.path()), settings());

    let result = agent.run("2 to the 10th?", options("power")).await;

    assert_eq!(result.metrics.tool_failures, 0);
    let messages = store.messages("power").expect("messages");
    let envelope: Value = serde_json::from_str(&messages[2].content).expect("envelope");
    assert_eq!(envelope["tool_result"]["data"]["result"], 1024.0);
}

#[tokio::test]
async fn file_store_resumes_a_conversation_across_agents() {
    let dir = tempdir().expect("tempdir");
    let store_dir = dir.path().join("conversations");

    let first = Script::new(&[r#"{"done": true, "response": "hello"}"#]);
    {
        let store = Arc::new(FileConversationStore::open(&store_dir).expect("open store"));
        let agent = Agent::new(first, store, registry(dir.path()), settings());
        let result = agent.run("Greet me", options("resume-me")).await;
        assert!(result.success());
    }

    let second = Script::new(&[r#"{"done": true, "response": "hello again"}"#]);
    let store = Arc::new(FileConversationStore::open(&store_dir).expect("reopen store"));
    let agent = Agent::new(second.clone(), store.clone(), registry(dir.path()), settings());
    let result = agent.run("Again", options("resume-me")).await;

    assert_eq!(result.response(), Some("hello again"));
    // system, user, assistant from the first run plus the new user message
    assert_eq!(second.seen(), vec![4]);
    let messages = store.messages("resume-me").expect("messages");
    assert_eq!(
        messages.iter().filter(|m| m.role == MessageRole::System).count(),
        1
    );
    assert_eq!(messages.len(), 5);
}

#[tokio::test]
async fn exhausted_script_surfaces_as_agent_error() {
    let dir = tempdir().expect("tempdir");
    let script = Script::new(&["not json", "still not json"]);
    let agent = Agent::new(
        script,
        Arc::new(InMemoryConversationStore::new()),
        registry(dir.path()),
        settings(),
    );

    let result = agent.run("Anything", AgentOptions::default()).await;

    assert_eq!(result.metrics.parse_errors, 2);
    assert_eq!(result.metrics.iterations, 3);
    assert!(matches!(result.error(), Some(AgentError::Model(_))));

    let payload = result.to_json();
    assert_eq!(payload["success"], false);
    assert_eq!(payload["error"]["kind"], "agent_error");
    assert_eq!(payload["metrics"]["parse_errors"], 2);
}

#[tokio::test]
async fn concurrent_runs_on_distinct_ids_do_not_interfere() {
    let dir = tempdir().expect("tempdir");
    let store: Arc<dyn ConversationStore> = Arc::new(InMemoryConversationStore::new());
    let registry = registry(dir.path());

    let left = Agent::new(
        Script::new(&[r#"{"done": true, "response": "left"}"#]),
        store.clone(),
        registry.clone(),
        settings(),
    );
    let right = Agent::new(
        Script::new(&[r#"{"done": true, "response": "right"}"#]),
        store.clone(),
        registry,
        settings(),
    );

    let (a, b) = tokio::join!(
        left.run("Left task", options("left")),
        right.run("Right task", options("right"))
    );

    assert_eq!(a.response(), Some("left"));
    assert_eq!(b.response(), Some("right"));
    assert_eq!(store.messages("left").expect("left log").len(), 3);
    assert_eq!(store.messages("right").expect("right log").len(), 3);
}
