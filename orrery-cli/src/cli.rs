use clap::Parser;
use std::error::Error;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "orrery",
    version,
    about = "Run a tool-using agent loop against a configurable chat model"
)]
pub struct Cli {
    /// Configuration file (defaults to config/orrery.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// System prompt override
    #[arg(long)]
    pub system: Option<String>,
    /// Continue an existing conversation
    #[arg(long)]
    pub conversation: Option<String>,
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,
    #[arg(long)]
    pub provider: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub max_iterations: Option<usize>,
    #[arg(long)]
    pub max_tokens: Option<usize>,
    /// Endpoint for every Ollama provider
    #[arg(long)]
    pub ollama_url: Option<String>,
    /// Print the tool catalog and exit
    #[arg(long)]
    pub list_tools: bool,
    /// Disable logging on stderr
    #[arg(long, short)]
    pub quiet: bool,
    pub prompt: Vec<String>,
}

/// Picks the prompt from `--prompt-file`, positional arguments or piped
/// stdin, in that order.
pub fn load_prompt(
    cli: &Cli,
    mut stdin: impl Read,
    stdin_is_terminal: bool,
) -> Result<String, Box<dyn Error>> {
    if let Some(path) = &cli.prompt_file {
        info!(path = %path.display(), "Loading prompt from file");
        let content = fs::read_to_string(path)?;
        return Ok(normalize_prompt(content));
    }

    if !cli.prompt.is_empty() {
        info!("Using prompt provided through CLI arguments");
        return Ok(normalize_prompt(cli.prompt.join(" ")));
    }

    if !stdin_is_terminal {
        info!("Reading prompt from standard input");
        let mut buffer = String::new();
        stdin.read_to_string(&mut buffer)?;
        return Ok(normalize_prompt(buffer));
    }

    warn!("Prompt not provided via arguments, file, or stdin");
    Err("prompt required via arguments, --prompt-file, or stdin".into())
}

fn normalize_prompt(prompt: String) -> String {
    prompt.trim().to_string()
}
