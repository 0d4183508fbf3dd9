//! Model types - Request, Response, and Error types

use crate::types::{ChatMessage, MessageRole};
use reqwest::StatusCode;
use thiserror::Error;

/// Longest slice of an error body kept in [`ModelError::Status`].
const STATUS_BODY_EXCERPT: usize = 512;

/// One chat turn sent to a provider: the whole conversation so far.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub provider: String,
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub message: ChatMessage,
    pub session_id: Option<String>,
}

impl ModelResponse {
    pub fn new(content: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            message: ChatMessage::new(MessageRole::Assistant, content),
            session_id,
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("provider '{provider}' is not configured")]
    ProviderNotFound { provider: String },
    #[error("model '{model}' is not available for provider '{provider}'")]
    ModelNotFound { provider: String, model: String },
    #[error("provider '{provider}' requires an API key")]
    MissingApiKey { provider: String },
    #[error("network error calling provider '{provider}': {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("provider '{provider}' responded with status {status}: {body}")]
    Status {
        provider: String,
        status: StatusCode,
        body: String,
    },
    #[error("provider '{provider}' returned invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

impl ModelError {
    pub fn provider_not_found(provider: impl Into<String>) -> Self {
        Self::ProviderNotFound {
            provider: provider.into(),
        }
    }

    pub fn model_not_found(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self::ModelNotFound {
            provider: provider.into(),
            model: model.into(),
        }
    }

    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        Self::MissingApiKey {
            provider: provider.into(),
        }
    }

    pub fn network(provider: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            provider: provider.into(),
            source,
        }
    }

    /// Builds a status error, keeping only the head of a long body.
    pub fn status(provider: impl Into<String>, status: StatusCode, body: &str) -> Self {
        let body = body.trim();
        let body = match body.char_indices().nth(STATUS_BODY_EXCERPT) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        };
        Self::Status {
            provider: provider.into(),
            status,
            body,
        }
    }

    pub fn invalid_response(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Short operator-facing explanation, reported as the error hint of a run.
    pub fn user_message(&self) -> String {
        match self {
            ModelError::ProviderNotFound { provider } => format!(
                "Model provider '{provider}' is not configured. Check the [[providers]] entries in orrery.toml."
            ),
            ModelError::ModelNotFound { provider, model } => {
                format!("Model '{model}' is not listed for provider '{provider}'.")
            }
            ModelError::MissingApiKey { provider } => format!(
                "Provider '{provider}' needs an API key. Set the variable named by api_key_env."
            ),
            ModelError::Network { provider, source } => {
                if source.is_connect() {
                    format!("Could not connect to model provider '{provider}'.")
                } else if source.is_timeout() {
                    format!("Request to '{provider}' timed out.")
                } else {
                    format!("Network error talking to '{provider}'.")
                }
            }
            ModelError::Status {
                provider, status, ..
            } => match *status {
                StatusCode::NOT_FOUND => {
                    format!("Endpoint of '{provider}' returned 404. Check the endpoint and model.")
                }
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    format!("Provider '{provider}' rejected the API key.")
                }
                StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                    format!("Provider '{provider}' is currently unavailable.")
                }
                other => format!("Request to '{provider}' failed with status {}.", other.as_u16()),
            },
            ModelError::InvalidResponse { provider, .. } => {
                format!("Response from '{provider}' could not be understood.")
            }
        }
    }
}
