//! Ollama `/api/chat` in non-streaming JSON mode

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::base::{Auth, HttpClientBase};
use crate::config::ModelProviderConfig;
use crate::infrastructure::model::adapter::MessageAdapter;
use crate::infrastructure::model::traits::ModelClient;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};

const CHAT_PATH: &str = "/api/chat";

#[derive(Clone)]
pub struct OllamaClient {
    base: HttpClientBase,
}

impl OllamaClient {
    pub fn from_config(config: &ModelProviderConfig) -> Self {
        Self {
            base: HttpClientBase::new(config.id.clone(), config.endpoint.clone(), None),
        }
    }
}

#[async_trait]
impl ModelClient for OllamaClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let body = ChatBody::from_request(&request);
        info!(
            provider = self.base.id.as_str(),
            model = body.model,
            turns = body.messages.len(),
            "ollama chat"
        );

        let reply: ChatReply = self.base.post_json(CHAT_PATH, Auth::None, &body).await?;
        let content = reply.into_content(&self.base.id)?;
        debug!(provider = self.base.id.as_str(), bytes = content.len(), "ollama replied");

        Ok(ModelResponse::new(content, request.session_id))
    }
}

/// `format: "json"` constrains the model to emit a single JSON value,
/// which is what the agent protocol expects.
#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: Vec<Value>,
    stream: bool,
    format: &'static str,
}

impl<'a> ChatBody<'a> {
    fn from_request(request: &'a ModelRequest) -> Self {
        Self {
            model: &request.model,
            messages: MessageAdapter::to_ollama_format(&request.messages),
            stream: false,
            format: "json",
        }
    }
}

/// Ollama can answer 200 with `{"error": "..."}` (for example when the
/// model is still loading), so the error field is checked before the message.
#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<ReplyMessage>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: String,
}

impl ChatReply {
    fn into_content(self, provider: &str) -> Result<String, ModelError> {
        if let Some(error) = self.error.filter(|e| !e.trim().is_empty()) {
            return Err(ModelError::invalid_response(provider, error));
        }
        self.message
            .map(|m| m.content)
            .ok_or_else(|| ModelError::invalid_response(provider, "reply has no message"))
    }
}
