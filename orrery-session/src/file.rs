use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

use crate::conversation::{Conversation, validate_conversation_id};
use crate::error::SessionError;
use crate::message::ChatMessage;
use crate::store::ConversationStore;

const SNAPSHOT_EXTENSION: &str = "bin";

/// Directory-backed store: one postcard snapshot per conversation.
///
/// Every mutation rewrites the snapshot through a temporary file and a
/// rename, so a crash never leaves a half-written conversation behind.
#[derive(Debug)]
pub struct FileConversationStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileConversationStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| SessionError::io(&root, source))?;
        info!(path = %root.display(), "Opened file conversation store");
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn snapshot_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.{SNAPSHOT_EXTENSION}"))
    }

    fn load(&self, id: &str) -> Result<Option<Conversation>, SessionError> {
        validate_conversation_id(id)?;
        let path = self.snapshot_path(id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(SessionError::io(path, source)),
        };
        postcard::from_bytes(&bytes)
            .map(Some)
            .map_err(|source| SessionError::Decode { path, source })
    }

    fn save(&self, conversation: &Conversation) -> Result<(), SessionError> {
        let bytes =
            postcard::to_allocvec(conversation).map_err(|source| SessionError::Encode {
                id: conversation.id.clone(),
                source,
            })?;
        let path = self.snapshot_path(&conversation.id);
        let staging = path.with_extension(format!("{SNAPSHOT_EXTENSION}.tmp"));
        fs::write(&staging, &bytes).map_err(|source| SessionError::io(&staging, source))?;
        fs::rename(&staging, &path).map_err(|source| SessionError::io(&path, source))?;
        debug!(
            conversation_id = conversation.id.as_str(),
            messages = conversation.messages.len(),
            bytes = bytes.len(),
            "Persisted conversation snapshot"
        );
        Ok(())
    }

    fn update<F>(&self, id: &str, apply: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut Conversation),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| SessionError::LockPoisoned)?;
        let mut conversation = self
            .load(id)?
            .ok_or_else(|| SessionError::NotFound { id: id.to_string() })?;
        apply(&mut conversation);
        self.save(&conversation)
    }
}

impl ConversationStore for FileConversationStore {
    fn create(&self, id: &str, seed: Vec<ChatMessage>) -> Result<(), SessionError> {
        for message in &seed {
            message.validate()?;
        }
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| SessionError::LockPoisoned)?;
        if self.load(id)?.is_some() {
            return Err(SessionError::AlreadyExists { id: id.to_string() });
        }
        self.save(&Conversation::new(id, seed))
    }

    fn add(&self, id: &str, message: ChatMessage) -> Result<(), SessionError> {
        message.validate()?;
        self.update(id, |conversation| conversation.push(message))
    }

    fn messages(&self, id: &str) -> Result<Vec<ChatMessage>, SessionError> {
        Ok(self
            .load(id)?
            .map(|conversation| conversation.messages)
            .unwrap_or_default())
    }

    fn clear(&self, id: &str) -> Result<(), SessionError> {
        self.update(id, Conversation::clear)
    }

    fn get(&self, id: &str) -> Result<Option<Conversation>, SessionError> {
        self.load(id)
    }
}
