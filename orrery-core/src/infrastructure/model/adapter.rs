//! Message adapters - convert conversation logs to wire formats

use crate::types::ChatMessage;
use serde_json::{Value, json};

pub struct MessageAdapter;

impl MessageAdapter {
    /// `[{"role": "...", "content": "..."}]`
    pub fn to_openai_format(messages: &[ChatMessage]) -> Vec<Value> {
        messages
            .iter()
            .map(|msg| {
                json!({
                    "role": msg.role.as_str(),
                    "content": msg.content.as_str()
                })
            })
            .collect()
    }

    /// Ollama's `/api/chat` takes the same role/content list.
    pub fn to_ollama_format(messages: &[ChatMessage]) -> Vec<Value> {
        Self::to_openai_format(messages)
    }
}
