mod cli;

use clap::Parser;
use cli::{Cli, load_prompt};
use orrery_core::agent::{Agent, AgentOptions};
use orrery_core::config::AppConfig;
use orrery_core::model::DynamicModelProvider;
use orrery_core::tooling::{ToolRegistry, builtin};
use std::error::Error;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);
    info!("Starting orrery");
    debug!(
        config = ?cli.config,
        conversation = ?cli.conversation,
        provider = ?cli.provider,
        model = ?cli.model,
        "CLI arguments parsed"
    );

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(url) = &cli.ollama_url {
        info!(url = url.as_str(), "Overriding Ollama endpoint from CLI flag");
        config.override_ollama_endpoint(url);
    }

    let mut registry = ToolRegistry::new();
    builtin::register_builtin_tools(&mut registry, &config.tools.read_file_root)?;

    if cli.list_tools {
        println!("{}", serde_json::to_string_pretty(&registry.list())?);
        return Ok(ExitCode::SUCCESS);
    }

    let stdin = io::stdin();
    let stdin_is_terminal = stdin.is_terminal();
    let prompt = load_prompt(&cli, stdin.lock(), stdin_is_terminal)?;

    let store = config.store.open()?;
    let provider = DynamicModelProvider::from_configs(&config.providers);
    let agent = Agent::new(provider, store, Arc::new(registry), config.agent_settings());

    let options = AgentOptions {
        conversation_id: cli.conversation.clone(),
        system_prompt: cli.system.clone(),
        provider: cli.provider.clone(),
        model: cli.model.clone(),
        max_iterations: cli.max_iterations,
        context_limit_threshold: None,
        max_tokens: cli.max_tokens,
    };

    let result = agent.run(prompt, options).await;
    println!("{}", serde_json::to_string_pretty(&result.to_json())?);

    if let Some(err) = result.error() {
        match err.hint() {
            Some(hint) => warn!(kind = err.kind(), hint = hint.as_str(), "Agent run did not complete"),
            None => warn!(kind = err.kind(), "Agent run did not complete"),
        }
        return Ok(ExitCode::FAILURE);
    }
    info!("Agent run finished");
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(quiet: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = if quiet {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .with_writer(io::stderr)
            .init();
    });
}
