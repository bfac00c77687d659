//! Write tool: create a file or overwrite one wholesale.
//!
//! Overwriting an existing file requires it to have been read first (same
//! read-before-write ledger Edit uses), and is subject to the same
//! content-hash staleness check and CRLF/LF preservation.

use super::edit_strategies::diff_stats;
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

pub struct WriteTool;

impl WriteTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WriteTool {
    fn default() -> Self {
        Self::new()
    }
}

fn is_safe_file(path: &std::path::Path, ctx: &ToolContext) -> bool {
    !ctx.is_plan_mode || ctx.plan_file_path.as_deref() == Some(path)
}

fn has_crlf(content: &str) -> bool {
    content
        .find('\n')
        .is_some_and(|i| i > 0 && content.as_bytes()[i - 1] == b'\r')
}

#[async_trait]
impl Tool for WriteTool {
    fn name(&self) -> &str {
        "Write"
    }

    fn description(&self) -> &str {
        "Writes content to a file, creating it if it doesn't exist or overwriting it entirely \
         if it does. Overwriting an existing file requires it to have been read first."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {"type": "string", "description": "Absolute path to the file"},
                "content": {"type": "string", "description": "Content to write"}
            },
            "required": ["file_path", "content"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Unsafe
    }

    fn is_read_only(&self) -> bool {
        false
    }

    async fn check_permission(&self, input: &Value, ctx: &ToolContext) -> PermissionResult {
        let path = match input.get("file_path").and_then(|v| v.as_str()) {
            Some(p) => ctx.resolve_path(p),
            None => return PermissionResult::Passthrough,
        };

        if crate::sensitive_files::is_locked_directory(&path) {
            return PermissionResult::Denied {
                reason: format!("Writing to a locked directory is not allowed: {}", path.display()),
            };
        }
        if ctx.is_plan_mode && !is_safe_file(&path, ctx) {
            return PermissionResult::Denied {
                reason: "Plan mode restricts writes to the plan file".to_string(),
            };
        }
        PermissionResult::Passthrough
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> Result<ToolOutput> {
        let file_path = input["file_path"].as_str().ok_or_else(|| {
            tool_error::InvalidInputSnafu {
                message: "file_path must be a string",
            }
            .build()
        })?;
        let content = input["content"].as_str().ok_or_else(|| {
            tool_error::InvalidInputSnafu {
                message: "content must be a string",
            }
            .build()
        })?;
        let path = ctx.resolve_path(file_path);

        if ctx.is_plan_mode && !is_safe_file(&path, ctx) {
            return Err(tool_error::PermissionDeniedSnafu {
                message: format!(
                    "Plan mode: cannot write '{}'. Only the plan file can be modified during plan mode.",
                    path.display()
                ),
            }
            .build());
        }

        let existed = path.exists();
        let mut message;
        let final_content;

        if existed {
            if !ctx.was_file_read(&path).await {
                return Err(tool_error::InvalidInputSnafu {
                    message: format!(
                        "File must be read before overwriting: {}. Use the Read tool first.",
                        path.display()
                    ),
                }
                .build());
            }

            let bytes = tokio::fs::read(&path).await?;
            if let Some(state) = ctx.file_read_state(&path).await {
                let current_hash = FileReadState::compute_hash(&bytes);
                if current_hash != state.hash {
                    return Err(tool_error::ExecutionFailedSnafu {
                        message: format!(
                            "File has been modified externally since last read: {}. Read the file again before writing.",
                            path.display()
                        ),
                    }
                    .build());
                }
            }

            let old_content = String::from_utf8_lossy(&bytes).replace("\r\n", "\n");
            let crlf = has_crlf(&String::from_utf8_lossy(&bytes));
            final_content = if crlf {
                content.replace("\r\n", "\n").replace('\n', "\r\n")
            } else {
                content.to_string()
            };
            message = format!("Successfully wrote to {}", path.display());
            message.push_str(&diff_stats(&old_content, content));
        } else {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
            final_content = content.to_string();
            message = format!("Successfully created {}", path.display());
        }

        tokio::fs::write(&path, &final_content).await?;

        ctx.record_file_modified(&path).await;
        let mtime = tokio::fs::metadata(&path).await.ok().and_then(|m| m.modified().ok());
        ctx.record_file_read_with_state(&path, FileReadState::complete(&final_content, mtime))
            .await;

        Ok(ToolOutput::text(message).with_modifier(ContextModifier::FileRead {
            path: path.clone(),
            content: final_content,
        }))
    }
}

#[cfg(test)]
#[path = "write.test.rs"]
mod tests;
