use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::errors::AgentError;

pub const DEFAULT_MAX_ITERATIONS: usize = 10;
pub const DEFAULT_CONTEXT_LIMIT_THRESHOLD: f64 = 0.8;
pub const DEFAULT_MAX_TOKENS: usize = 128_000;

/// Budgets for one run. Immutable once the run starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub max_iterations: usize,
    /// Fraction of `max_tokens` at which the run stops.
    pub context_limit_threshold: f64,
    pub max_tokens: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            context_limit_threshold: DEFAULT_CONTEXT_LIMIT_THRESHOLD,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl AgentConfig {
    /// Applies per-call overrides on top of these defaults.
    pub fn merged(&self, options: &AgentOptions) -> Self {
        Self {
            max_iterations: options.max_iterations.unwrap_or(self.max_iterations),
            context_limit_threshold: options
                .context_limit_threshold
                .unwrap_or(self.context_limit_threshold),
            max_tokens: options.max_tokens.unwrap_or(self.max_tokens),
        }
    }

    pub fn validate(&self) -> Result<(), AgentError> {
        if self.max_iterations == 0 {
            return Err(AgentError::invalid_config("max_iterations must be at least 1"));
        }
        if self.max_tokens == 0 {
            return Err(AgentError::invalid_config("max_tokens must be at least 1"));
        }
        if !(self.context_limit_threshold > 0.0 && self.context_limit_threshold <= 1.0) {
            return Err(AgentError::invalid_config(
                "context_limit_threshold must be in (0, 1]",
            ));
        }
        Ok(())
    }

    /// Estimated token count above which the run is stopped.
    pub fn token_limit(&self) -> f64 {
        self.max_tokens as f64 * self.context_limit_threshold
    }
}

/// Per-call overrides. Unset fields fall back to the agent's settings.
#[derive(Debug, Clone, Default)]
pub struct AgentOptions {
    /// Reuse an existing conversation; a fresh id is generated when unset.
    pub conversation_id: Option<String>,
    pub system_prompt: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub max_iterations: Option<usize>,
    pub context_limit_threshold: Option<f64>,
    pub max_tokens: Option<usize>,
}

/// Counters for one run. Owned by that run and handed back with the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AgentMetrics {
    pub iterations: usize,
    pub tool_calls: usize,
    /// Malformed model turns: JSON syntax errors and shape mismatches alike.
    pub parse_errors: usize,
    pub tool_failures: usize,
    pub context_limit_reached: bool,
}

/// The only output of a run. Metrics are present whether or not it succeeded.
#[derive(Debug)]
pub struct AgentResult {
    pub conversation_id: String,
    pub outcome: Result<String, AgentError>,
    pub metrics: AgentMetrics,
}

impl AgentResult {
    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn response(&self) -> Option<&str> {
        self.outcome.as_deref().ok()
    }

    pub fn error(&self) -> Option<&AgentError> {
        self.outcome.as_ref().err()
    }

    pub fn to_json(&self) -> Value {
        let mut payload = json!({
            "conversation_id": self.conversation_id,
            "success": self.success(),
            "metrics": self.metrics,
        });
        if let Some(map) = payload.as_object_mut() {
            match &self.outcome {
                Ok(response) => {
                    map.insert("response".into(), json!(response));
                }
                Err(err) => {
                    let mut error = json!({ "kind": err.kind(), "message": err.to_string() });
                    if let (Some(hint), Some(fields)) = (err.hint(), error.as_object_mut()) {
                        fields.insert("hint".into(), json!(hint));
                    }
                    map.insert("error".into(), error);
                }
            }
        }
        payload
    }
}
