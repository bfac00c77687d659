//! Read tool for viewing file contents, with line numbers and optional
//! offset/limit windowing for large files.

use crate::context::FileReadState;
use crate::context::ToolContext;
use crate::error::Result;
use crate::error::tool_error;
use crate::tool::Tool;
use crate::tool::ToolOutputExt;
use async_trait::async_trait;
use turnkit_protocol::ConcurrencySafety;
use turnkit_protocol::ContextModifier;
use turnkit_protocol::PermissionResult;
use turnkit_protocol::ToolOutput;
use serde_json::Value;

/// Maximum characters of a single line before it is truncated.
const MAX_LINE_CHARS: usize = 2000;
/// Default number of lines read when no `limit` is given.
const DEFAULT_LIMIT: usize = 2000;

pub struct ReadTool;

impl ReadTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReadTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ReadTool {
    fn name(&self) -> &str {
        "Read"
    }

    fn description(&self) -> &str {
        "Reads a file from the filesystem, returning its content with 1-indexed line numbers. \
         Supports offset/limit to page through large files; lines longer than 2000 characters \
         are truncated."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {"type": "string", "description": "Absolute path to the file"},
                "offset": {"type": "integer", "description": "Line number to start reading from, 1-indexed"},
                "limit": {"type": "integer", "description": "Number of lines to read"}
            },
            "required": ["file_path"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Safe
    }

    async fn check_permission(&self, _input: &Value, _ctx: &ToolContext) -> PermissionResult {
        PermissionResult::Allowed
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> Result<ToolOutput> {
        let file_path = input["file_path"].as_str().ok_or_else(|| {
            tool_error::InvalidInputSnafu {
                message: "file_path must be a string",
            }
            .build()
        })?;
        let path = ctx.resolve_path(file_path);

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            tool_error::ExecutionFailedSnafu {
                message: format!("Failed to read {}: {e}", path.display()),
            }
            .build()
        })?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        let offset = input["offset"].as_i64().unwrap_or(0).max(0) as usize;
        let limit = input["limit"].as_i64().unwrap_or(DEFAULT_LIMIT as i64).max(0) as usize;

        let lines: Vec<&str> = content.split('\n').collect();
        let start = offset.min(lines.len());
        let end = (start + limit).min(lines.len());

        let mut out = String::new();
        if start < lines.len() {
            for (i, line) in lines[start..end].iter().enumerate() {
                let line_no = start + i + 1;
                let truncated = if line.chars().count() > MAX_LINE_CHARS {
                    let cut: String = line.chars().take(MAX_LINE_CHARS).collect();
                    format!("{cut}...")
                } else {
                    line.to_string()
                };
                out.push_str(&format!("{line_no:>6}\t{truncated}\n"));
            }
        }

        ctx.record_file_read(&path).await;
        let mtime = tokio::fs::metadata(&path).await.ok().and_then(|m| m.modified().ok());
        ctx.record_file_read_with_state(&path, FileReadState::complete(&content, mtime))
            .await;

        Ok(ToolOutput::text(out).with_modifier(ContextModifier::FileRead { path, content }))
    }
}

#[cfg(test)]
#[path = "read.test.rs"]
mod tests;
