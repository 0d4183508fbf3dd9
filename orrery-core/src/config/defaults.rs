pub const DEFAULT_CONFIG_PATH: &str = "config/orrery.toml";
pub const DEFAULT_ENV_PATH: &str = "config/.env";
pub const DEFAULT_PROVIDER_ID: &str = "ollama";
pub const DEFAULT_MODEL: &str = "llama3";
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://127.0.0.1:11434";
pub const DEFAULT_STORE_PATH: &str = "~/.orrery/conversations";
pub const DEFAULT_READ_FILE_ROOT: &str = ".";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a careful assistant that solves tasks step by step. \
Use the available tools when they help, check their results, and finish with a concise answer.";
