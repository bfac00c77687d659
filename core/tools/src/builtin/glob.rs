//! Glob tool: find files by name pattern, respecting .gitignore/.ignore and
//! sorted by modification time (most recent first).

use crate::context::ToolContext;
use crate::error::Result;
use crate::error::tool_error;
use crate::tool::Tool;
use crate::tool::ToolOutputExt;
use async_trait::async_trait;
use globset::GlobBuilder;
use ignore::WalkBuilder;
use turnkit_protocol::ConcurrencySafety;
use turnkit_protocol::PermissionResult;
use turnkit_protocol::ToolOutput;
use serde_json::Value;
use std::time::SystemTime;

pub struct GlobTool;

impl GlobTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GlobTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for GlobTool {
    fn name(&self) -> &str {
        "Glob"
    }

    fn description(&self) -> &str {
        "Finds files matching a glob pattern (e.g. \"**/*.rs\"), respecting .gitignore/.ignore, \
         sorted by modification time with the most recently modified first."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pattern": {"type": "string", "description": "Glob pattern to match file paths against"},
                "path": {"type": "string", "description": "Directory to search in, defaults to the working directory"},
                "case_sensitive": {"type": "boolean", "description": "Case-sensitive matching, default true"}
            },
            "required": ["pattern"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Safe
    }

    async fn check_permission(&self, _input: &Value, _ctx: &ToolContext) -> PermissionResult {
        PermissionResult::Allowed
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> Result<ToolOutput> {
        let pattern = input["pattern"].as_str().ok_or_else(|| {
            tool_error::InvalidInputSnafu {
                message: "pattern must be a string",
            }
            .build()
        })?;
        let case_sensitive = input["case_sensitive"].as_bool().unwrap_or(true);
        let search_path = input["path"]
            .as_str()
            .map(|p| ctx.resolve_path(p))
            .unwrap_or_else(|| ctx.cwd.clone());

        let glob = GlobBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .literal_separator(pattern.contains('/'))
            .build()
            .map_err(|e| {
                tool_error::InvalidInputSnafu {
                    message: format!("Invalid glob pattern '{pattern}': {e}"),
                }
                .build()
            })?
            .compile_matcher();

        let search_path_owned = search_path.clone();
        let pattern_owned = pattern.to_string();
        let mut entries = tokio::task::spawn_blocking(move || {
            let mut found: Vec<(std::path::PathBuf, SystemTime)> = Vec::new();
            let mut walker = WalkBuilder::new(&search_path_owned);
            walker.hidden(false);
            for entry in walker.build().flatten() {
                if entry.file_type().map(|t| !t.is_file()).unwrap_or(true) {
                    continue;
                }
                let path = entry.path();
                let relative = path.strip_prefix(&search_path_owned).unwrap_or(path);
                let candidate = if pattern_owned.contains('/') {
                    relative
                } else {
                    std::path::Path::new(relative.file_name().unwrap_or_default())
                };
                if glob.is_match(candidate) {
                    let mtime = entry
                        .metadata()
                        .ok()
                        .and_then(|m| m.modified().ok())
                        .unwrap_or(SystemTime::UNIX_EPOCH);
                    found.push((path.to_path_buf(), mtime));
                }
            }
            found
        })
        .await
        .map_err(|e| {
            tool_error::ExecutionFailedSnafu {
                message: format!("glob search task failed: {e}"),
            }
            .build()
        })?;

        entries.sort_by(|a, b| b.1.cmp(&a.1));

        if entries.is_empty() {
            return Ok(ToolOutput::text(format!(
                "No files found matching '{pattern}' in {}",
                search_path.display()
            )));
        }

        let listing = entries
            .into_iter()
            .map(|(path, _)| path.display().to_string())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(ToolOutput::text(listing))
    }
}

#[cfg(test)]
#[path = "glob.test.rs"]
mod tests;
