//! Conversation primitives shared by the agent loop and the model clients.

pub use orrery_session::{ChatMessage, MessageRole};
