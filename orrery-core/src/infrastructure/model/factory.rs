//! Provider factory - creates clients from config

use super::clients::{OllamaClient, OpenAIClient};
use super::traits::ModelClient;
use crate::config::{ModelProviderConfig, ProviderKind};

pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create(config: &ModelProviderConfig) -> Box<dyn ModelClient> {
        match config.kind {
            ProviderKind::Ollama => Box::new(OllamaClient::from_config(config)),
            ProviderKind::OpenAi => Box::new(OpenAIClient::from_config(config)),
        }
    }
}
