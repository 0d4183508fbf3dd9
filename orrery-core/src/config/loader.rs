use super::app::AppConfig;
use super::defaults::{DEFAULT_CONFIG_PATH, DEFAULT_ENV_PATH, DEFAULT_STORE_PATH};
use super::error::ConfigError;
use super::provider::{ModelProviderConfig, RawProviderConfig};
use super::store::{RawStoreConfig, StoreConfig};
use super::tool::{RawToolsConfig, ToolsConfig};
use crate::agent::AgentConfig;
use dotenvy::from_filename;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{debug, info};

static ENV_LOADER: Once = Once::new();

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    default_provider: Option<String>,
    model: Option<String>,
    system_prompt: Option<String>,
    #[serde(default)]
    agent: RawAgentConfig,
    #[serde(default)]
    store: RawStoreConfig,
    #[serde(default)]
    tools: RawToolsConfig,
    #[serde(default)]
    providers: Vec<RawProviderConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct RawAgentConfig {
    max_iterations: Option<usize>,
    context_limit_threshold: Option<f64>,
    max_tokens: Option<usize>,
}

/// Loads `config/.env` into the process environment, once.
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(DEFAULT_ENV_PATH);
    });
}

/// Load and validate configuration.
///
/// A missing file at the default path falls back to [`AppConfig::default`];
/// a missing file at an explicit path is an error.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    match path {
        Some(path) => read_config(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_PATH);
            match read_config(path) {
                Err(ConfigError::NotFound { .. }) => {
                    info!(path = %path.display(), "No configuration file; using built-in defaults");
                    Ok(AppConfig::default())
                }
                other => other,
            }
        }
    }
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str, origin: &Path) -> Result<AppConfig, ConfigError> {
    let parsed: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    validate_and_build(parsed)
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&content, path)
}

fn validate_and_build(parsed: RawConfig) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();

    let agent = AgentConfig {
        max_iterations: parsed
            .agent
            .max_iterations
            .unwrap_or(defaults.agent.max_iterations),
        context_limit_threshold: parsed
            .agent
            .context_limit_threshold
            .unwrap_or(defaults.agent.context_limit_threshold),
        max_tokens: parsed.agent.max_tokens.unwrap_or(defaults.agent.max_tokens),
    };
    agent
        .validate()
        .map_err(|err| ConfigError::InvalidAgentSetting {
            reason: err.to_string(),
        })?;

    let mut providers = if parsed.providers.is_empty() {
        defaults.providers
    } else {
        let mut providers = Vec::with_capacity(parsed.providers.len());
        for raw in parsed.providers {
            let endpoint = raw
                .endpoint
                .filter(|endpoint| !endpoint.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEndpoint {
                    provider: raw.id.clone(),
                })?;
            providers.push(ModelProviderConfig {
                id: raw.id,
                kind: raw.kind,
                endpoint,
                api_key_env: raw.api_key_env,
                models: raw.models,
            });
        }
        providers
    };

    let default_provider = parsed.default_provider.unwrap_or(defaults.default_provider);
    let model = parsed.model.unwrap_or(defaults.model);
    let Some(provider) = providers.iter_mut().find(|p| p.id == default_provider) else {
        return Err(ConfigError::UnknownDefaultProvider {
            provider: default_provider,
        });
    };
    provider.ensure_model(&model);

    let store = StoreConfig {
        kind: parsed.store.kind,
        path: expand_path(parsed.store.path.as_deref().unwrap_or(DEFAULT_STORE_PATH))?,
    };
    let tools = ToolsConfig {
        read_file_root: match parsed.tools.read_file_root.as_deref() {
            Some(root) => expand_path(root)?,
            None => defaults.tools.read_file_root,
        },
    };

    Ok(AppConfig {
        default_provider,
        model,
        system_prompt: parsed
            .system_prompt
            .filter(|prompt| !prompt.trim().is_empty())
            .unwrap_or(defaults.system_prompt),
        agent,
        store,
        tools,
        providers,
    })
}

/// Expands `~` and `$VAR` references.
pub fn expand_path(value: &str) -> Result<PathBuf, ConfigError> {
    shellexpand::full(value)
        .map(|expanded| PathBuf::from(expanded.into_owned()))
        .map_err(|err| ConfigError::InvalidPath {
            value: value.to_string(),
            reason: err.to_string(),
        })
}
