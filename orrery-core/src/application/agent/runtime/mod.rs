//! Turning raw model text into a typed instruction, and the text the loop
//! writes back into the conversation.

mod instructions;
mod parser;
mod validator;

pub use instructions::{
    COMPLETION_FORMAT, TOOL_CALL_FORMAT, canonical_formats, compose_system_message,
    parse_error_feedback, render_tool_catalog, tool_result_envelope, validation_error_feedback,
};
pub use parser::{ParseFailure, parse_response, strip_markdown};
pub use validator::{ValidationFailure, validate_response};
