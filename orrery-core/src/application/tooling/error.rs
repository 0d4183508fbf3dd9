use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Registry misuse. These are programming errors, not model mistakes.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool '{name}' is already registered")]
    AlreadyRegistered { name: String },
}

/// Raised from a tool's execute body. The registry converts it into a
/// failed [`ToolResult`](super::ToolResult).
#[derive(Debug, Error)]
pub enum ToolExecutionError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Failed(String),
}

impl ToolExecutionError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
