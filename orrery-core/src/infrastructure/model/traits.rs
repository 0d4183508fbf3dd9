//! Model traits

use super::types::{ModelError, ModelRequest, ModelResponse};
use async_trait::async_trait;

/// Chat completion service the agent loop talks to.
///
/// Timeouts and cancellation belong to the implementation; the loop treats
/// any error as terminal for the run.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}

/// A single HTTP backend, routed to by [`super::DynamicModelProvider`].
#[async_trait]
pub trait ModelClient: Send + Sync {
    fn id(&self) -> &str;

    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}
