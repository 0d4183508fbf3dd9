use orrery_session::{
    ConversationStore, FileConversationStore, InMemoryConversationStore, SessionError,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Memory,
    File,
}

/// Where conversations live. `path` is only used by the file store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn open(&self) -> Result<Arc<dyn ConversationStore>, SessionError> {
        let store: Arc<dyn ConversationStore> = match self.kind {
            StoreKind::Memory => Arc::new(InMemoryConversationStore::new()),
            StoreKind::File => Arc::new(FileConversationStore::open(&self.path)?),
        };
        Ok(store)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawStoreConfig {
    #[serde(default)]
    pub(super) kind: StoreKind,
    pub(super) path: Option<String>,
}
