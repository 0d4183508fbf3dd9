// Config loading tests - default path fallback and explicit paths
//
// These change the working directory, so they run serially.

use orrery_core::config::{AppConfig, ConfigError, StoreKind};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

struct CwdGuard(PathBuf);

impl CwdGuard {
    fn enter(dir: &Path) -> Self {
        let previous = env::current_dir().expect("current dir");
        env::set_current_dir(dir).expect("enter temp dir");
        Self(previous)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.0);
    }
}

#[test]
#[serial]
fn missing_default_file_falls_back_to_defaults() {
    let dir = tempdir().expect("tempdir");
    let _cwd = CwdGuard::enter(dir.path());

    let config = AppConfig::load(None).expect("defaults");
    assert_eq!(config.default_provider, "ollama");
    assert_eq!(config.store.kind, StoreKind::Memory);
    assert!(config.provider("ollama").is_some());
}

#[test]
#[serial]
fn default_path_is_read_when_present() {
    let dir = tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("config")).expect("config dir");
    fs::write(
        dir.path().join("config/orrery.toml"),
        "model = \"phi3\"\n[agent]\nmax_iterations = 3\n",
    )
    .expect("write config");
    let _cwd = CwdGuard::enter(dir.path());

    let config = AppConfig::load(None).expect("config loads");
    assert_eq!(config.model, "phi3");
    assert_eq!(config.agent.max_iterations, 3);
}

#[test]
fn explicit_missing_path_is_an_error() {
    let result = AppConfig::load(Some(Path::new("/nonexistent/path/orrery.toml")));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
fn malformed_file_reports_parse_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("orrery.toml");
    fs::write(&path, "model = [unclosed").expect("write");
    let result = AppConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn unknown_top_level_keys_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("orrery.toml");
    fs::write(&path, "prompt_template = \"old\"\n").expect("write");
    assert!(matches!(
        AppConfig::load(Some(&path)),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn ollama_override_touches_only_ollama_providers() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("orrery.toml");
    fs::write(
        &path,
        r#"
default_provider = "local"

[[providers]]
id = "local"
type = "ollama"
endpoint = "http://127.0.0.1:11434"

[[providers]]
id = "cloud"
type = "openai"
endpoint = "https://api.openai.com"
api_key_env = "OPENAI_API_KEY"
"#,
    )
    .expect("write");

    let mut config = AppConfig::load(Some(&path)).expect("config loads");
    config.override_ollama_endpoint("http://gpu-box:11434");

    assert_eq!(config.provider("local").unwrap().endpoint, "http://gpu-box:11434");
    assert_eq!(config.provider("cloud").unwrap().endpoint, "https://api.openai.com");

    let settings = config.agent_settings();
    assert_eq!(settings.provider, "local");
}
