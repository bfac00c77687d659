//! Bash tool for executing shell commands.
//!
//! Runs the command through `/bin/sh -c`, capturing stdout/stderr and
//! enforcing a timeout. There is no background-task or persistent-shell
//! support: each call is a fresh, independent process.

use crate::context::ToolContext;
use crate::error::Result;
use crate::tool::Tool;
use async_trait::async_trait;
use turnkit_protocol::ApprovalRequest;
use turnkit_protocol::ConcurrencySafety;
use turnkit_protocol::PermissionResult;
use turnkit_protocol::ToolOutput;
use serde_json::Value;

/// Default timeout in seconds.
const DEFAULT_TIMEOUT_SECS: i64 = 120;
/// Maximum timeout in seconds.
const MAX_TIMEOUT_SECS: i64 = 600;

/// Tool for executing shell commands.
pub struct BashTool;

impl BashTool {
    /// Create a new Bash tool.
    pub fn new() -> Self {
        Self
    }
}

impl Default for BashTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a command is read-only (safe for concurrent execution).
pub fn is_read_only_command(command: &str) -> bool {
    let trimmed = command.trim();
    let first_word = trimmed.split_whitespace().next().unwrap_or("");

    let is_simple = !trimmed.contains("&&")
        && !trimmed.contains("||")
        && !trimmed.contains(';')
        && !trimmed.contains('|')
        && !trimmed.contains('>')
        && !trimmed.contains('<');

    if !is_simple {
        return false;
    }

    match first_word {
        "git" => {
            let subcommand = trimmed.split_whitespace().nth(1).unwrap_or("");
            matches!(
                subcommand,
                "status"
                    | "log"
                    | "diff"
                    | "show"
                    | "branch"
                    | "tag"
                    | "remote"
                    | "rev-parse"
                    | "describe"
                    | "ls-files"
                    | "ls-tree"
                    | "cat-file"
                    | "config"
                    | "blame"
                    | "shortlog"
            )
        }
        _ => matches!(
            first_word,
            "ls" | "cat"
                | "head"
                | "tail"
                | "wc"
                | "grep"
                | "rg"
                | "find"
                | "which"
                | "whoami"
                | "pwd"
                | "echo"
                | "date"
                | "env"
                | "printenv"
                | "uname"
                | "hostname"
                | "df"
                | "du"
                | "file"
                | "stat"
                | "type"
        ),
    }
}

/// Commands that always need a human to sign off, regardless of risk
/// heuristics: anything that can delete data or escalate privilege.
fn has_destructive_pattern(command: &str) -> bool {
    const PATTERNS: &[&str] = &[
        "rm -rf", "rm -fr", "sudo ", "mkfs", "dd if=", "> /dev/sd", ":(){ :|:& };:",
    ];
    PATTERNS.iter().any(|p| command.contains(p))
}

#[async_trait]
impl Tool for BashTool {
    fn name(&self) -> &str {
        "Bash"
    }

    fn description(&self) -> &str {
        "Executes a shell command and returns its stdout/stderr. Runs in a fresh, \
         non-interactive shell with no persisted state across calls."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The command to execute"
                },
                "description": {
                    "type": "string",
                    "description": "Clear description of what this command does"
                },
                "timeout": {
                    "type": "integer",
                    "description": "Optional timeout in milliseconds (max 600000)"
                }
            },
            "required": ["command"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Unsafe
    }

    fn is_concurrency_safe_for(&self, input: &Value) -> bool {
        input["command"]
            .as_str()
            .map(is_read_only_command)
            .unwrap_or(false)
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn max_result_size_chars(&self) -> i32 {
        30_000
    }

    async fn check_permission(&self, input: &Value, _ctx: &ToolContext) -> PermissionResult {
        let command = match input.get("command").and_then(|v| v.as_str()) {
            Some(cmd) => cmd,
            None => return PermissionResult::Passthrough,
        };

        if is_read_only_command(command) {
            return PermissionResult::Allowed;
        }

        let description = if command.len() > 120 {
            format!("{}...", &command[..120])
        } else {
            command.to_string()
        };

        if has_destructive_pattern(command) {
            return PermissionResult::Denied {
                reason: format!("Command blocked, looks destructive: {description}"),
            };
        }

        let prefix_pattern = command
            .split_whitespace()
            .next()
            .map(|first| format!("{first} *"));

        PermissionResult::NeedsApproval {
            request: ApprovalRequest {
                request_id: format!(
                    "bash-{}",
                    std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .map(|d| d.as_nanos())
                        .unwrap_or(0)
                ),
                tool_name: "Bash".to_string(),
                description,
                risks: vec![],
                allow_remember: true,
                proposed_prefix_pattern: prefix_pattern,
            },
        }
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> Result<ToolOutput> {
        let command = input["command"].as_str().ok_or_else(|| {
            crate::error::tool_error::InvalidInputSnafu {
                message: "command must be a string",
            }
            .build()
        })?;

        let timeout_ms = input["timeout"]
            .as_i64()
            .unwrap_or(DEFAULT_TIMEOUT_SECS * 1000);
        let timeout_secs = (timeout_ms / 1000).clamp(1, MAX_TIMEOUT_SECS) as u64;

        let desc = input["description"].as_str().unwrap_or("Executing command");
        ctx.emit_progress(desc).await;

        let mut child = tokio::process::Command::new("/bin/sh")
            .arg("-c")
            .arg(command)
            .current_dir(&ctx.cwd)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .map_err(|e| {
                crate::error::tool_error::ExecutionFailedSnafu {
                    message: e.to_string(),
                }
                .build()
            })?;

        let wait = child.wait_with_output();
        let output = tokio::select! {
            result = wait => result.map_err(|e| {
                crate::error::tool_error::ExecutionFailedSnafu { message: e.to_string() }.build()
            })?,
            _ = tokio::time::sleep(std::time::Duration::from_secs(timeout_secs)) => {
                return Err(crate::error::tool_error::TimeoutSnafu { timeout_secs: timeout_secs as i64 }.build());
            }
            _ = ctx.cancelled() => {
                return Err(crate::error::tool_error::AbortedSnafu { reason: "cancelled" }.build());
            }
        };

        let mut text = String::new();
        text.push_str(&String::from_utf8_lossy(&output.stdout));
        if !output.stderr.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str("STDERR:\n");
            text.push_str(&String::from_utf8_lossy(&output.stderr));
        }

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            if text.is_empty() {
                text = format!("Command failed with exit code {code}");
            } else {
                text.push_str(&format!("\n\nExit code: {code}"));
            }
            return Ok(ToolOutput::error(text));
        }

        if text.is_empty() {
            text = "(no output)".to_string();
        }
        Ok(ToolOutput::text(text))
    }
}

#[cfg(test)]
#[path = "bash.test.rs"]
mod tests;
