//! Chat completions client for OpenAI-compatible endpoints
//! (OpenAI, Groq, Mistral, vLLM, LM Studio).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::base::{Auth, HttpClientBase};
use crate::config::ModelProviderConfig;
use crate::infrastructure::model::adapter::MessageAdapter;
use crate::infrastructure::model::traits::ModelClient;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Clone)]
pub struct OpenAIClient {
    base: HttpClientBase,
}

impl OpenAIClient {
    pub fn from_config(config: &ModelProviderConfig) -> Self {
        Self {
            base: HttpClientBase::new(config.id.clone(), config.endpoint.clone(), config.api_key()),
        }
    }
}

#[async_trait]
impl ModelClient for OpenAIClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let body = CompletionBody {
            model: &request.model,
            messages: MessageAdapter::to_openai_format(&request.messages),
            stream: false,
        };
        info!(
            provider = self.base.id.as_str(),
            model = body.model,
            turns = body.messages.len(),
            "chat completion"
        );

        let reply: CompletionReply = self
            .base
            .post_json(CHAT_COMPLETIONS_PATH, Auth::Bearer, &body)
            .await?;
        let content = reply.into_content(&self.base.id)?;
        debug!(provider = self.base.id.as_str(), bytes = content.len(), "completion received");

        Ok(ModelResponse::new(content, request.session_id))
    }
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<Value>,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionReply {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl CompletionReply {
    /// Content of the first choice. Some compatible servers return an
    /// `error` object with a 200 status, which is surfaced as is.
    fn into_content(self, provider: &str) -> Result<String, ModelError> {
        if let Some(error) = self.error {
            return Err(ModelError::invalid_response(provider, error.message));
        }
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| ModelError::invalid_response(provider, "reply has no content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(value: Value) -> CompletionReply {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn first_choice_content_is_used() {
        let content = reply(json!({
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "first"}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ]
        }))
        .into_content("openai")
        .unwrap();
        assert_eq!(content, "first");
    }

    #[test]
    fn null_content_is_rejected() {
        let err = reply(json!({"choices": [{"message": {"role": "assistant", "content": null}}]}))
            .into_content("openai")
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidResponse { .. }));
    }

    #[test]
    fn error_object_is_reported() {
        let err = reply(json!({"error": {"message": "context length exceeded", "type": "invalid_request_error"}}))
            .into_content("groq")
            .unwrap_err();
        assert!(err.to_string().contains("context length exceeded"));
    }
}
