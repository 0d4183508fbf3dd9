use crate::conversation::Conversation;
use crate::error::SessionError;
use crate::message::ChatMessage;

/// Storage for role-tagged conversation logs, addressed by conversation id.
///
/// Implementations are expected to serialise access per id. The agent loop
/// never holds a conversation across calls; it re-reads the log every turn.
pub trait ConversationStore: Send + Sync {
    /// Creates the conversation with its initial messages.
    ///
    /// Fails with [`SessionError::AlreadyExists`] when the id is taken.
    fn create(&self, id: &str, seed: Vec<ChatMessage>) -> Result<(), SessionError>;

    /// Appends one message. Fails with [`SessionError::NotFound`] when the
    /// conversation has not been created.
    fn add(&self, id: &str, message: ChatMessage) -> Result<(), SessionError>;

    /// Returns the full ordered log, or an empty list when the id is unknown.
    fn messages(&self, id: &str) -> Result<Vec<ChatMessage>, SessionError>;

    /// Empties the message list but keeps the conversation record.
    fn clear(&self, id: &str) -> Result<(), SessionError>;

    fn get(&self, id: &str) -> Result<Option<Conversation>, SessionError>;

    fn exists(&self, id: &str) -> Result<bool, SessionError> {
        Ok(self.get(id)?.is_some())
    }

    /// Cheap size heuristic over the whole log, see [`estimate_tokens`].
    fn estimate_tokens(&self, id: &str) -> Result<usize, SessionError> {
        Ok(estimate_tokens(&self.messages(id)?))
    }
}

/// Characters divided by four, rounded up, over the concatenated content.
pub fn estimate_tokens(messages: &[ChatMessage]) -> usize {
    let chars: usize = messages
        .iter()
        .map(|message| message.content.chars().count())
        .sum();
    chars.div_ceil(4)
}
