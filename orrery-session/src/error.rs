use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("conversation '{id}' already exists")]
    AlreadyExists { id: String },
    #[error("conversation '{id}' does not exist")]
    NotFound { id: String },
    #[error("invalid conversation id '{id}': {reason}")]
    InvalidId { id: String, reason: String },
    #[error("invalid message: {reason}")]
    InvalidMessage { reason: String },
    #[error("conversation storage I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode conversation '{id}': {source}")]
    Encode {
        id: String,
        #[source]
        source: postcard::Error,
    },
    #[error("failed to decode conversation snapshot {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: postcard::Error,
    },
    #[error("conversation store lock poisoned")]
    LockPoisoned,
}

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
