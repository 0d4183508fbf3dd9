//! # orrery-session
//!
//! Conversation storage for the orrery agent loop.
//!
//! A conversation is an append-only log of role-tagged messages. The agent
//! loop reads the whole log on every turn and only ever mutates it through
//! the [`ConversationStore`] trait.
//!
//! Two stores ship with the crate:
//!
//! - [`InMemoryConversationStore`] keeps everything in a process-local map.
//! - [`FileConversationStore`] keeps one postcard snapshot per conversation
//!   in a directory, so a conversation id can be resumed across processes.

mod conversation;
mod error;
mod file;
mod memory;
mod message;
mod store;

pub use conversation::{Conversation, new_conversation_id, validate_conversation_id};
pub use error::SessionError;
pub use file::FileConversationStore;
pub use memory::InMemoryConversationStore;
pub use message::{ChatMessage, MessageRole};
pub use store::{ConversationStore, estimate_tokens};
