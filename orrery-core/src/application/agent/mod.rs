//! # Agent Module
//!
//! Drives a model through a task with a JSON instruction protocol. Each turn
//! the model either calls a tool or declares it is done:
//!
//! ```text
//! {"tool": "<name>", "args": {...}}
//! {"done": true, "response": "<text>"}
//! ```
//!
//! ## Key Types
//!
//! - [`Agent`] - the orchestration loop
//! - [`AgentSettings`] / [`AgentConfig`] / [`AgentOptions`] - defaults, budgets and per-call overrides
//! - [`AgentResult`] / [`AgentMetrics`] - outcome of a run
//! - [`AgentError`] - terminal failures
//!
//! ## Agent Loop
//!
//! 1. Seed an empty conversation with the system message, append the user input
//! 2. Stop if the conversation estimate is over the context limit
//! 3. Send the full history to the model
//! 4. Malformed JSON or a wrong shape is written back as a system message and the loop continues
//! 5. A tool call is executed and its `{"tool_result": ...}` envelope is appended
//! 6. A completion ends the run

mod directive;
mod errors;
mod models;
mod runner;
pub mod runtime;


pub use directive::{Completion, ParsedResponse};
pub use errors::AgentError;
pub use models::{
    AgentConfig, AgentMetrics, AgentOptions, AgentResult, DEFAULT_CONTEXT_LIMIT_THRESHOLD,
    DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_TOKENS,
};
pub use runner::{Agent, AgentSettings};
