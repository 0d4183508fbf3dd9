//! Model infrastructure module
//!
//! - `types` - request, response and error types
//! - `traits` - `ModelProvider` and `ModelClient`
//! - `adapter` - message wire formats
//! - `factory` - builds clients from provider config
//! - `clients` - Ollama and OpenAI-compatible HTTP clients
//! - `provider` - `DynamicModelProvider` routing by provider id

pub mod adapter;
pub mod clients;
pub mod factory;
pub mod provider;
pub mod traits;
pub mod types;

pub use provider::DynamicModelProvider;
pub use traits::{ModelClient, ModelProvider};
pub use types::{ModelError, ModelRequest, ModelResponse};
