use serde::Serialize;

use crate::tooling::ToolCall;

/// What a single model turn asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    ToolCall(ToolCall),
    Completion(Completion),
}

/// The model's declaration that the task is finished. The wire form carries
/// `"done": true`, which is a tag and therefore not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub response: String,
}
