//! Built-in tools for the agent.
//!
//! This module provides the standard set of built-in tools:
//! - [`ReadTool`] - Read file contents
//! - [`GlobTool`] - Pattern-based file search
//! - [`GrepTool`] - Content search with regex
//! - [`EditTool`] - Targeted string replacement in files
//! - [`WriteTool`] - Write/overwrite files
//! - [`BashTool`] - Execute shell commands

mod bash;
mod edit;
mod edit_strategies;
mod glob;
mod grep;
mod read;
mod write;

pub use bash::BashTool;
pub use edit::EditTool;
pub use glob::GlobTool;
pub use grep::GrepTool;
pub use read::ReadTool;
pub use write::WriteTool;

use crate::registry::ToolRegistry;

/// Register all built-in tools with a registry.
pub fn register_builtin_tools(registry: &mut ToolRegistry) {
    registry.register(ReadTool::new());
    registry.register(GlobTool::new());
    registry.register(GrepTool::new());
    registry.register(EditTool::new());
    registry.register(WriteTool::new());
    registry.register(BashTool::new());
}

/// Get a list of built-in tool names.
pub fn builtin_tool_names() -> Vec<&'static str> {
    vec!["Read", "Glob", "Grep", "Edit", "Write", "Bash"]
}
