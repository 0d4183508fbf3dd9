//! Tools that ship with orrery.

mod calculator;
mod read_file;

pub use calculator::CalculatorTool;
pub use read_file::ReadFileTool;

use std::path::PathBuf;

use super::{ToolError, ToolRegistry};

/// Registers every built-in tool. `read_root` bounds what `read_file` may open.
pub fn register_builtin_tools(
    registry: &mut ToolRegistry,
    read_root: impl Into<PathBuf>,
) -> Result<(), ToolError> {
    registry.register(ReadFileTool::new(read_root))?;
    registry.register(CalculatorTool::new())?;
    Ok(())
}
