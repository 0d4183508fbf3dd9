use orrery_session::{ChatMessage, ConversationStore, SessionError, new_conversation_id};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::directive::ParsedResponse;
use super::errors::AgentError;
use super::models::{AgentConfig, AgentMetrics, AgentOptions, AgentResult};
use super::runtime::{
    compose_system_message, parse_error_feedback, parse_response, tool_result_envelope,
    validate_response, validation_error_feedback,
};
use crate::config::DEFAULT_SYSTEM_PROMPT;
use crate::model::{ModelProvider, ModelRequest};
use crate::tooling::ToolRegistry;

/// Defaults an [`Agent`] applies when a call does not override them.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub provider: String,
    pub model: String,
    pub system_prompt: String,
    pub config: AgentConfig,
}

impl AgentSettings {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            config: AgentConfig::default(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }
}

pub struct Agent<P: ModelProvider> {
    provider: P,
    store: Arc<dyn ConversationStore>,
    registry: Arc<ToolRegistry>,
    settings: AgentSettings,
}

impl<P: ModelProvider> Agent<P> {
    pub fn new(
        provider: P,
        store: Arc<dyn ConversationStore>,
        registry: Arc<ToolRegistry>,
        settings: AgentSettings,
    ) -> Self {
        Self {
            provider,
            store,
            registry,
            settings,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    /// Runs the task to completion, failure or budget exhaustion.
    ///
    /// Never panics or raises; every ending is an [`AgentResult`] carrying the
    /// metrics gathered so far.
    pub async fn run(&self, input: impl Into<String>, options: AgentOptions) -> AgentResult {
        let input = input.into();
        let conversation_id = options
            .conversation_id
            .clone()
            .unwrap_or_else(new_conversation_id);
        let mut metrics = AgentMetrics::default();

        info!(conversation_id = conversation_id.as_str(), "Agent run started");
        let outcome = self
            .drive(&conversation_id, &input, &options, &mut metrics)
            .await;

        match &outcome {
            Ok(_) => info!(
                conversation_id = conversation_id.as_str(),
                iterations = metrics.iterations,
                tool_calls = metrics.tool_calls,
                "Agent returned final response"
            ),
            Err(err) => warn!(
                conversation_id = conversation_id.as_str(),
                iterations = metrics.iterations,
                kind = err.kind(),
                error = %err,
                "Agent run failed"
            ),
        }

        AgentResult {
            conversation_id,
            outcome,
            metrics,
        }
    }

    async fn drive(
        &self,
        conversation_id: &str,
        input: &str,
        options: &AgentOptions,
        metrics: &mut AgentMetrics,
    ) -> Result<String, AgentError> {
        let system_prompt = options
            .system_prompt
            .as_deref()
            .unwrap_or(&self.settings.system_prompt);
        if input.trim().is_empty() {
            return Err(AgentError::InvalidInput { field: "user input" });
        }
        if system_prompt.trim().is_empty() {
            return Err(AgentError::InvalidInput {
                field: "system prompt",
            });
        }

        let config = self.settings.config.merged(options);
        config.validate()?;
        let provider = options
            .provider
            .clone()
            .unwrap_or_else(|| self.settings.provider.clone());
        let model = options
            .model
            .clone()
            .unwrap_or_else(|| self.settings.model.clone());
        let catalog = self.registry.list();

        self.seed(conversation_id, system_prompt)?;
        self.store
            .add(conversation_id, ChatMessage::user(input))?;

        let limit = config.token_limit();
        for _ in 0..config.max_iterations {
            metrics.iterations += 1;
            let iteration = metrics.iterations;

            let estimated_tokens = self.store.estimate_tokens(conversation_id)?;
            if estimated_tokens as f64 > limit {
                metrics.context_limit_reached = true;
                warn!(
                    conversation_id,
                    iteration,
                    estimated_tokens,
                    limit,
                    "Context limit reached before model call"
                );
                return Err(AgentError::ContextLimitReached {
                    iterations: iteration,
                    estimated_tokens,
                    limit: limit as usize,
                    tool_calls: metrics.tool_calls,
                    parse_errors: metrics.parse_errors,
                });
            }

            let messages = self.store.messages(conversation_id)?;
            debug!(
                conversation_id,
                iteration,
                messages = messages.len(),
                estimated_tokens,
                "Submitting agent turn to model provider"
            );
            let response = self
                .provider
                .chat(ModelRequest {
                    provider: provider.clone(),
                    model: model.clone(),
                    messages,
                    session_id: Some(conversation_id.to_string()),
                })
                .await?;
            let content = response.message.content;

            let value = match parse_response(&content) {
                Ok(value) => value,
                Err(failure) => {
                    metrics.parse_errors += 1;
                    warn!(conversation_id, iteration, error = %failure, "Model response is not valid JSON");
                    self.store.add(
                        conversation_id,
                        ChatMessage::system(parse_error_feedback(&failure, &catalog)),
                    )?;
                    continue;
                }
            };

            let parsed = match validate_response(&value) {
                Ok(parsed) => parsed,
                Err(failure) => {
                    metrics.parse_errors += 1;
                    warn!(conversation_id, iteration, error = %failure, "Model response has the wrong shape");
                    self.store.add(
                        conversation_id,
                        ChatMessage::system(validation_error_feedback(&failure)),
                    )?;
                    continue;
                }
            };

            match parsed {
                ParsedResponse::Completion(completion) => {
                    self.store
                        .add(conversation_id, ChatMessage::assistant(content))?;
                    return Ok(completion.response);
                }
                ParsedResponse::ToolCall(call) => {
                    metrics.tool_calls += 1;
                    info!(conversation_id, iteration, tool = %call.tool, "Agent requested tool execution");
                    let result = self.registry.execute(&call).await;
                    if !result.success() {
                        metrics.tool_failures += 1;
                        warn!(
                            conversation_id,
                            tool = %call.tool,
                            error = result.error().unwrap_or_default(),
                            "Tool call failed; reporting back to model"
                        );
                    }
                    self.store.add(
                        conversation_id,
                        ChatMessage::assistant(tool_result_envelope(&result)),
                    )?;
                }
            }
        }

        warn!(
            conversation_id,
            max_iterations = config.max_iterations,
            "Agent exceeded max iterations"
        );
        Err(AgentError::MaxIterationsExceeded {
            max_iterations: config.max_iterations,
            tool_calls: metrics.tool_calls,
            parse_errors: metrics.parse_errors,
        })
    }

    /// Opens an empty conversation with the system message. A conversation
    /// that already has history is left untouched.
    fn seed(&self, conversation_id: &str, system_prompt: &str) -> Result<(), SessionError> {
        if !self.store.messages(conversation_id)?.is_empty() {
            debug!(conversation_id, "Continuing existing conversation");
            return Ok(());
        }
        let system = ChatMessage::system(compose_system_message(
            system_prompt,
            &self.registry.list(),
        ));
        if self.store.exists(conversation_id)? {
            self.store.add(conversation_id, system)
        } else {
            self.store.create(conversation_id, vec![system])
        }
    }
}
