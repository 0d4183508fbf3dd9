use super::defaults::{
    DEFAULT_MODEL, DEFAULT_OLLAMA_ENDPOINT, DEFAULT_PROVIDER_ID, DEFAULT_READ_FILE_ROOT,
    DEFAULT_STORE_PATH, DEFAULT_SYSTEM_PROMPT,
};
use super::error::ConfigError;
use super::provider::{ModelProviderConfig, ProviderKind};
use super::store::{StoreConfig, StoreKind};
use super::tool::ToolsConfig;
use crate::agent::{AgentConfig, AgentSettings};
use std::path::{Path, PathBuf};

/// Application configuration loaded from orrery.toml
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_provider: String,
    pub model: String,
    pub system_prompt: String,
    pub agent: AgentConfig,
    pub store: StoreConfig,
    pub tools: ToolsConfig,
    pub providers: Vec<ModelProviderConfig>,
}

impl Default for AppConfig {
    /// A single local Ollama provider and an in-memory store.
    fn default() -> Self {
        Self {
            default_provider: DEFAULT_PROVIDER_ID.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            agent: AgentConfig::default(),
            store: StoreConfig {
                kind: StoreKind::Memory,
                path: PathBuf::from(shellexpand::tilde(DEFAULT_STORE_PATH).into_owned()),
            },
            tools: ToolsConfig {
                read_file_root: PathBuf::from(DEFAULT_READ_FILE_ROOT),
            },
            providers: vec![ModelProviderConfig::ollama(
                DEFAULT_PROVIDER_ID,
                DEFAULT_OLLAMA_ENDPOINT,
            )],
        }
    }
}

impl AppConfig {
    /// Load configuration from a file path (or the default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    pub fn provider(&self, id: &str) -> Option<&ModelProviderConfig> {
        self.providers.iter().find(|provider| provider.id == id)
    }

    /// Points every Ollama provider at `endpoint`.
    pub fn override_ollama_endpoint(&mut self, endpoint: &str) {
        for provider in &mut self.providers {
            if provider.kind == ProviderKind::Ollama {
                provider.endpoint = endpoint.to_string();
            }
        }
    }

    pub fn agent_settings(&self) -> AgentSettings {
        AgentSettings::new(&self.default_provider, &self.model)
            .with_system_prompt(&self.system_prompt)
            .with_config(self.agent)
    }
}
