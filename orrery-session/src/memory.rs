use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::conversation::{Conversation, validate_conversation_id};
use crate::error::SessionError;
use crate::message::ChatMessage;
use crate::store::ConversationStore;

/// Process-local store. Conversations live as long as the store does.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    conversations: Mutex<HashMap<String, Conversation>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, SessionError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Conversation>>, SessionError> {
        self.conversations
            .lock()
            .map_err(|_| SessionError::LockPoisoned)
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn create(&self, id: &str, seed: Vec<ChatMessage>) -> Result<(), SessionError> {
        validate_conversation_id(id)?;
        for message in &seed {
            message.validate()?;
        }
        let mut conversations = self.lock()?;
        if conversations.contains_key(id) {
            return Err(SessionError::AlreadyExists { id: id.to_string() });
        }
        debug!(conversation_id = id, seeded = seed.len(), "Created conversation");
        conversations.insert(id.to_string(), Conversation::new(id, seed));
        Ok(())
    }

    fn add(&self, id: &str, message: ChatMessage) -> Result<(), SessionError> {
        message.validate()?;
        let mut conversations = self.lock()?;
        let conversation = conversations
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound { id: id.to_string() })?;
        conversation.push(message);
        Ok(())
    }

    fn messages(&self, id: &str) -> Result<Vec<ChatMessage>, SessionError> {
        Ok(self
            .lock()?
            .get(id)
            .map(|conversation| conversation.messages.clone())
            .unwrap_or_default())
    }

    fn clear(&self, id: &str) -> Result<(), SessionError> {
        let mut conversations = self.lock()?;
        let conversation = conversations
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound { id: id.to_string() })?;
        conversation.clear();
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Conversation>, SessionError> {
        Ok(self.lock()?.get(id).cloned())
    }
}
