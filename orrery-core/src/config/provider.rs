//! # Provider Configuration
//!
//! | Type | API | API key |
//! |------|-----|---------|
//! | `ollama` | `/api/chat` | No |
//! | `openai` | `/v1/chat/completions` | Yes, read from `api_key_env` |

use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Ollama,
    #[serde(rename = "openai")]
    OpenAi,
}

/// One chat backend.
///
/// ```toml
/// [[providers]]
/// id = "openai"
/// type = "openai"
/// endpoint = "https://api.openai.com"
/// api_key_env = "OPENAI_API_KEY"
/// models = ["gpt-4o-mini"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelProviderConfig {
    pub id: String,
    pub kind: ProviderKind,
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: Option<String>,
    /// Models this provider accepts. Empty means any.
    pub models: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct RawProviderConfig {
    pub(super) id: String,
    #[serde(rename = "type")]
    pub(super) kind: ProviderKind,
    pub(super) endpoint: Option<String>,
    #[serde(default)]
    pub(super) api_key_env: Option<String>,
    #[serde(default)]
    pub(super) models: Vec<String>,
}

impl ModelProviderConfig {
    pub fn ollama(id: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ProviderKind::Ollama,
            endpoint: endpoint.into(),
            api_key_env: None,
            models: Vec::new(),
        }
    }

    /// Reads the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        let name = self.api_key_env.as_deref().map(str::trim)?;
        if name.is_empty() {
            return None;
        }
        match env::var(name) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    provider = self.id.as_str(),
                    env_var = name,
                    %err,
                    "API key environment variable is not set"
                );
                None
            }
        }
    }

    /// Makes sure `model` passes the provider's model filter.
    pub fn ensure_model(&mut self, model: &str) {
        if !self.models.is_empty() && self.models.iter().all(|name| name != model) {
            self.models.push(model.to_string());
        }
    }
}
