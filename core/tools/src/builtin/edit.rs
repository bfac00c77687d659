//! Edit tool for string replacement in files.
//!
//! Supports three matching strategies (tried in order):
//! 1. **Exact** — precise string matching (default)
//! 2. **Flexible** — whitespace-tolerant fallback when exact match fails
//! 3. **Regex** — token-based fuzzy matching (first occurrence only)
//!
//! Also supports file creation via `old_string == ""` and SHA256-based
//! concurrent modification detection.

use super::edit_strategies::diff_stats;
use super::edit_strategies::find_closest_match;
use super::edit_strategies::pre_correct_escaping;
use super::edit_strategies::trim_pair_if_possible;
use super::edit_strategies::try_match;
use crate::context::FileReadState;
use crate::context::ToolContext;
use crate::error::Result;
use crate::error::tool_error;
use crate::sensitive_files::is_locked_directory;
use crate::sensitive_files::is_sensitive_directory;
use crate::sensitive_files::is_sensitive_file;
use crate::tool::Tool;
use crate::tool::ToolOutputExt;
use async_trait::async_trait;
use turnkit_protocol::ApprovalRequest;
use turnkit_protocol::ConcurrencySafety;
use turnkit_protocol::ContextModifier;
use turnkit_protocol::PermissionResult;
use turnkit_protocol::RiskSeverity;
use turnkit_protocol::RiskType;
use turnkit_protocol::SecurityRisk;
use turnkit_protocol::ToolOutput;
use serde_json::Value;
use tokio::fs;

/// Whether plan mode allows writing to `path`: outside plan mode anything
/// is allowed; inside it, only the designated plan file is.
fn is_safe_file(path: &std::path::Path, ctx: &ToolContext) -> bool {
    !ctx.is_plan_mode || ctx.plan_file_path.as_deref() == Some(path)
}

/// Whether `content` uses CRLF line endings, judged by its first line break.
fn has_crlf(content: &str) -> bool {
    content
        .find('\n')
        .is_some_and(|i| i > 0 && content.as_bytes()[i - 1] == b'\r')
}

/// Tool for performing string replacements in files.
///
/// Requires the file to have been read first (tracked via FileTracker).
/// Supports file creation when `old_string` is empty.
pub struct EditTool;

impl EditTool {
    /// Create a new Edit tool.
    pub fn new() -> Self {
        Self
    }

    /// Create a new file (when `old_string == ""`).
    async fn create_new_file(
        &self,
        path: &std::path::Path,
        new_string: &str,
        ctx: &mut ToolContext,
    ) -> Result<ToolOutput> {
        if path.exists() {
            return Err(tool_error::ExecutionFailedSnafu {
                message: format!(
                    "Cannot create file: {} already exists. Use non-empty old_string to edit existing files.",
                    path.display()
                ),
            }
            .build());
        }

        if ctx.is_plan_mode && !is_safe_file(path, ctx) {
            return Err(tool_error::ExecutionFailedSnafu {
                message: format!(
                    "Plan mode: cannot create '{}'. Only the plan file can be modified during plan mode.",
                    path.display()
                ),
            }
            .build());
        }

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        fs::write(path, new_string).await?;

        ctx.record_file_modified(path).await;
        let new_mtime = fs::metadata(path)
            .await
            .ok()
            .and_then(|m| m.modified().ok());
        ctx.record_file_read_with_state(path, FileReadState::complete(new_string, new_mtime))
            .await;

        let result = ToolOutput::text(format!("Created new file: {}", path.display())).with_modifier(
            ContextModifier::FileRead {
                path: path.to_path_buf(),
                content: new_string.to_string(),
            },
        );
        Ok(result)
    }
}

impl Default for EditTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for EditTool {
    fn name(&self) -> &str {
        "Edit"
    }

    fn description(&self) -> &str {
        "Makes a targeted string replacement in a file. old_string must uniquely identify the \
         text to change unless replace_all is set. Pass an empty old_string to create a new \
         file. The file must have been read with the Read tool first."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The absolute path to the file to modify"
                },
                "old_string": {
                    "type": "string",
                    "description": "The text to replace. Use an empty string to create a new file."
                },
                "new_string": {
                    "type": "string",
                    "description": "The text to replace it with (must be different from old_string)"
                },
                "replace_all": {
                    "type": "boolean",
                    "description": "Replace all occurrences (default false)",
                    "default": false
                }
            },
            "required": ["file_path", "old_string", "new_string"]
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

        if is_locked_directory(&path) {
            return PermissionResult::Denied {
                reason: format!(
                    "Editing files in locked directory is not allowed: {}",
                    path.display()
                ),
            };
        }

        if ctx.is_plan_mode && !is_safe_file(&path, ctx) {
            return PermissionResult::Denied {
                reason: format!(
                    "Plan mode: cannot edit '{}'. Only the plan file can be modified.",
                    path.display()
                ),
            };
        }

        if is_sensitive_file(&path) {
            return PermissionResult::NeedsApproval {
                request: ApprovalRequest {
                    request_id: format!("sensitive-edit-{}", path.display()),
                    tool_name: self.name().to_string(),
                    description: format!("Modifying sensitive file: {}", path.display()),
                    risks: vec![SecurityRisk {
                        risk_type: RiskType::SensitiveFile,
                        severity: RiskSeverity::High,
                        message: format!(
                            "File '{}' may contain credentials or sensitive configuration",
                            path.display()
                        ),
                    }],
                    allow_remember: true,
                    proposed_prefix_pattern: None,
                },
            };
        }

        if is_sensitive_directory(&path) {
            return PermissionResult::NeedsApproval {
                request: ApprovalRequest {
                    request_id: format!("sensitive-dir-edit-{}", path.display()),
                    tool_name: self.name().to_string(),
                    description: format!("Editing file in sensitive directory: {}", path.display()),
                    risks: vec![SecurityRisk {
                        risk_type: RiskType::SystemConfig,
                        severity: RiskSeverity::Medium,
                        message: format!(
                            "Directory '{}' contains project configuration",
                            path.display()
                        ),
                    }],
                    allow_remember: true,
                    proposed_prefix_pattern: None,
                },
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
        let old_string = input["old_string"].as_str().ok_or_else(|| {
            tool_error::InvalidInputSnafu {
                message: "old_string must be a string",
            }
            .build()
        })?;
        let new_string = input["new_string"].as_str().ok_or_else(|| {
            tool_error::InvalidInputSnafu {
                message: "new_string must be a string",
            }
            .build()
        })?;
        let replace_all = input["replace_all"].as_bool().unwrap_or(false);

        let path = ctx.resolve_path(file_path);

        if old_string.is_empty() {
            return self.create_new_file(&path, new_string, ctx).await;
        }

        if old_string == new_string {
            return Err(tool_error::InvalidInputSnafu {
                message: "old_string and new_string must be different",
            }
            .build());
        }

        if path.extension().is_some_and(|ext| ext == "ipynb") {
            return Err(tool_error::InvalidInputSnafu {
                message: format!(
                    "Cannot use Edit tool on Jupyter notebook files. \
                     Use the NotebookEdit tool instead to modify cells in '{}'.",
                    path.display()
                ),
            }
            .build());
        }

        if ctx.is_plan_mode && !is_safe_file(&path, ctx) {
            return Err(tool_error::PermissionDeniedSnafu {
                message: format!(
                    "Plan mode: cannot edit '{}'. Only the plan file can be modified during plan mode.",
                    path.display()
                ),
            }
            .build());
        }

        if !ctx.was_file_read(&path).await {
            return Err(tool_error::InvalidInputSnafu {
                message: format!(
                    "File must be read before editing: {}. Use the Read tool first.",
                    path.display()
                ),
            }
            .build());
        }

        let bytes = fs::read(&path).await?;

        if let Some(state) = ctx.file_read_state(&path).await {
            let current_hash = FileReadState::compute_hash(&bytes);
            if current_hash != state.hash {
                return Err(tool_error::ExecutionFailedSnafu {
                    message: format!(
                        "File has been modified externally since last read: {}. Read the file again before editing.",
                        path.display()
                    ),
                }
                .build());
            }
        }

        let crlf = has_crlf(&String::from_utf8_lossy(&bytes));
        let content = String::from_utf8_lossy(&bytes).replace("\r\n", "\n");

        let (working_old, working_new) = pre_correct_escaping(old_string, new_string, &content);

        if !replace_all && content.matches(working_old.as_str()).count() > 1 {
            return Err(tool_error::InvalidInputSnafu {
                message: format!(
                    "old_string matches multiple locations in {}. Include more surrounding \
                     context to uniquely identify the target, or set replace_all to replace \
                     every occurrence.",
                    path.display()
                ),
            }
            .build());
        }

        let matched = try_match(&content, &working_old, &working_new, replace_all).or_else(|| {
            trim_pair_if_possible(&working_old, &working_new, &content)
                .and_then(|(old, new)| try_match(&content, &old, &new, replace_all))
        });

        let (replaced_content, _count, strategy) = matched.ok_or_else(|| {
            tool_error::InvalidInputSnafu {
                message: format!(
                    "old_string not found in file (tried exact, flexible, and regex matching): {}\n\
                     {}\n\
                     The file may have changed. Use the Read tool to re-read the file and verify the exact content before retrying.",
                    path.display(),
                    find_closest_match(&content, &working_old)
                ),
            }
            .build()
        })?;

        let new_content = if crlf {
            replaced_content.replace('\n', "\r\n")
        } else {
            replaced_content
        };
        fs::write(&path, &new_content).await?;

        ctx.record_file_modified(&path).await;
        let new_mtime = fs::metadata(&path)
            .await
            .ok()
            .and_then(|m| m.modified().ok());
        ctx.record_file_read_with_state(&path, FileReadState::complete(&new_content, new_mtime))
            .await;

        let message = format!(
            "Successfully edited {} using {}{}",
            path.display(),
            strategy.label(),
            diff_stats(&working_old, &working_new)
        );

        Ok(ToolOutput::text(message).with_modifier(ContextModifier::FileRead {
            path: path.clone(),
            content: new_content,
        }))
    }
}

#[cfg(test)]
#[path = "edit.test.rs"]
mod tests;
