use orrery_session::SessionError;
use thiserror::Error;

use crate::model::ModelError;

/// Why a run ended without a completion.
///
/// Recoverable problems (bad JSON, wrong shape, tool failures) never show up
/// here; they are written back into the conversation instead.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid input: {field} must not be empty")]
    InvalidInput { field: &'static str },
    #[error("invalid agent configuration: {reason}")]
    InvalidConfig { reason: String },
    #[error(
        "context limit reached at iteration {iterations}: estimated {estimated_tokens} tokens exceeds {limit} (tool calls: {tool_calls}, parse errors: {parse_errors})"
    )]
    ContextLimitReached {
        iterations: usize,
        estimated_tokens: usize,
        limit: usize,
        tool_calls: usize,
        parse_errors: usize,
    },
    #[error(
        "max iterations exceeded: no completion after {max_iterations} iterations (tool calls: {tool_calls}, parse errors: {parse_errors})"
    )]
    MaxIterationsExceeded {
        max_iterations: usize,
        tool_calls: usize,
        parse_errors: usize,
    },
    #[error("agent error: {0}")]
    Model(#[from] ModelError),
    #[error("agent error: {0}")]
    Store(#[from] SessionError),
}

impl AgentError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            AgentError::InvalidInput { .. } | AgentError::InvalidConfig { .. } => "invalid_input",
            AgentError::ContextLimitReached { .. } => "context_limit_reached",
            AgentError::MaxIterationsExceeded { .. } => "max_iterations_exceeded",
            AgentError::Model(_) | AgentError::Store(_) => "agent_error",
        }
    }

    /// Operator-facing advice for provider failures.
    pub fn hint(&self) -> Option<String> {
        match self {
            AgentError::Model(err) => Some(err.user_message()),
            _ => None,
        }
    }
}
