//! # orrery-core
//!
//! The agent loop and everything it talks to: the response parser and
//! validator, the tool registry, model provider clients and configuration.
//!
//! ```no_run
//! use orrery_core::agent::{Agent, AgentOptions};
//! use orrery_core::config::AppConfig;
//! use orrery_core::model::DynamicModelProvider;
//! use orrery_core::tooling::{ToolRegistry, builtin};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load(None)?;
//! let mut registry = ToolRegistry::new();
//! builtin::register_builtin_tools(&mut registry, &config.tools.read_file_root)?;
//!
//! let agent = Agent::new(
//!     DynamicModelProvider::from_configs(&config.providers),
//!     config.store.open()?,
//!     Arc::new(registry),
//!     config.agent_settings(),
//! );
//! let result = agent.run("What is 2 to the power of 10?", AgentOptions::default()).await;
//! println!("{}", result.to_json());
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{agent, tooling};
pub use config::{AppConfig, ConfigError};
pub use domain::types;
pub use infrastructure::model;
