//! # Configuration
//!
//! Loaded from `config/orrery.toml` (see [`AppConfig::load`]). Every key is
//! optional; omitted keys take the values in [`defaults`].

pub mod app;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod provider;
pub mod store;
pub mod tool;

pub use app::AppConfig;
pub use defaults::{DEFAULT_CONFIG_PATH, DEFAULT_SYSTEM_PROMPT};
pub use error::ConfigError;
pub use loader::{expand_path, load_config, parse_config};
pub use provider::{ModelProviderConfig, ProviderKind};
pub use store::{StoreConfig, StoreKind};
pub use tool::ToolsConfig;
