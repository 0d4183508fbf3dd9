use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::message::ChatMessage;

/// The stored record for one conversation id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(id: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            messages,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.touch();
    }

    pub(crate) fn clear(&mut self) {
        self.messages.clear();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

pub fn new_conversation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Ids double as snapshot file names, so only `[A-Za-z0-9_-]` is allowed.
pub fn validate_conversation_id(id: &str) -> Result<(), SessionError> {
    if id.is_empty() {
        return Err(SessionError::InvalidId {
            id: id.to_string(),
            reason: "id must not be empty".into(),
        });
    }
    if let Some(bad) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(SessionError::InvalidId {
            id: id.to_string(),
            reason: format!("character '{bad}' is not allowed"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_valid() {
        let id = new_conversation_id();
        assert!(validate_conversation_id(&id).is_ok());
    }

    #[test]
    fn rejects_path_like_ids() {
        assert!(validate_conversation_id("../etc/passwd").is_err());
        assert!(validate_conversation_id("").is_err());
        assert!(validate_conversation_id("task_42-b").is_ok());
    }

    #[test]
    fn push_moves_updated_at() {
        let mut conversation = Conversation::new("c1", Vec::new());
        let created = conversation.created_at;
        conversation.push(ChatMessage::user("hi"));
        assert_eq!(conversation.messages.len(), 1);
        assert!(conversation.updated_at >= created);
    }
}
