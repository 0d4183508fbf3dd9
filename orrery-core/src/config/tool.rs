use serde::Deserialize;
use std::path::PathBuf;

/// Settings for the built-in tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolsConfig {
    /// Directory `read_file` may read beneath.
    pub read_file_root: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawToolsConfig {
    pub(super) read_file_root: Option<String>,
}
