//! Streaming tool executor for concurrent tool execution.
//!
//! This module provides [`StreamingToolExecutor`] which manages tool execution
//! during streaming, starting safe tools immediately and queuing unsafe tools
//! for sequential execution once the model's turn finishes.

use crate::context::ApprovalStore;
use crate::context::FileTracker;
use crate::context::PermissionRequester;
use crate::context::ToolContext;
use crate::context::ToolContextBuilder;
use crate::error::Result;
use crate::permission_rules::PermissionRuleEvaluator;
use crate::permission_rules::RuleAction;
use crate::registry::ToolRegistry;
use crate::result_persistence;
use turnkit_protocol::AbortReason;
use turnkit_protocol::ApprovalDecision;
use turnkit_protocol::LoopEvent;
use turnkit_protocol::PermissionMode;
use turnkit_protocol::PermissionResult;
use turnkit_protocol::ToolConfig;
use turnkit_protocol::ToolOutput;
use turnkit_protocol::ValidationResult;
use turnkit_provider::ToolCall;
use serde_json::Value;
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::RwLock;
use tokio::sync::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::error;
use tracing::info;

/// Default maximum concurrent tool executions.
pub const DEFAULT_MAX_TOOL_CONCURRENCY: i32 = 10;

/// Configuration for the tool executor.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum concurrent tool executions.
    ///
    /// Configurable via `TURNKIT_MAX_TOOL_USE_CONCURRENCY` environment variable.
    pub max_concurrency: i32,
    /// Working directory for tool execution.
    pub cwd: PathBuf,
    /// Session ID.
    pub session_id: String,
    /// Permission mode.
    pub permission_mode: PermissionMode,
    /// Default timeout for tool execution (seconds).
    pub default_timeout_secs: i64,
    /// Whether plan mode is currently active.
    pub is_plan_mode: bool,
    /// Path to the current plan file (if in plan mode).
    pub plan_file_path: Option<PathBuf>,
    /// Session directory for storing large tool results.
    pub session_dir: Option<PathBuf>,
    /// Tool configuration for result persistence settings.
    pub tool_config: ToolConfig,
    /// Model-level cap on tool output size (characters).
    pub max_tool_output_chars: Option<i32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        let max_concurrency = std::env::var("TURNKIT_MAX_TOOL_USE_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_MAX_TOOL_CONCURRENCY);

        Self {
            max_concurrency,
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
            session_id: String::new(),
            permission_mode: PermissionMode::Default,
            default_timeout_secs: 120,
            is_plan_mode: false,
            plan_file_path: None,
            session_dir: None,
            tool_config: ToolConfig::default(),
            max_tool_output_chars: None,
        }
    }
}

/// Pending tool call waiting for execution.
#[derive(Debug)]
struct PendingToolCall {
    tool_call: ToolCall,
    #[allow(dead_code)]
    queued_at: std::time::Instant,
}

/// Result from a tool execution.
#[derive(Debug)]
pub struct ToolExecutionResult {
    /// Tool call ID.
    pub call_id: String,
    /// Tool name.
    pub name: String,
    /// Execution result.
    pub result: Result<ToolOutput>,
}

/// Streaming tool executor that manages concurrent tool execution.
///
/// - Safe tools start immediately when their `ToolUse` block completes.
/// - Unsafe tools are queued and executed sequentially after message_stop.
///
/// # Example
///
/// ```ignore
/// let executor = StreamingToolExecutor::new(registry, config, event_tx);
///
/// executor.on_tool_complete(tool_call).await;
/// executor.execute_pending_unsafe().await;
/// let results = executor.drain().await;
/// ```
pub struct StreamingToolExecutor {
    registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
    event_tx: Option<mpsc::Sender<LoopEvent>>,
    cancel_token: CancellationToken,
    approval_store: Arc<Mutex<ApprovalStore>>,
    file_tracker: Arc<Mutex<FileTracker>>,
    /// Active tool execution tasks.
    active_tasks: Arc<Mutex<HashMap<String, JoinHandle<ToolExecutionResult>>>>,
    /// Pending unsafe tools waiting for sequential execution.
    pending_unsafe: Arc<Mutex<Vec<PendingToolCall>>>,
    /// Completed results waiting to be collected.
    completed_results: Arc<Mutex<Vec<ToolExecutionResult>>>,
    /// Optional permission requester for interactive approval flow.
    permission_requester: Option<Arc<dyn PermissionRequester>>,
    /// Optional permission rule evaluator.
    permission_evaluator: Option<PermissionRuleEvaluator>,
    /// Allowlist of tool names the model was actually given.
    ///
    /// Set after `select_tools_for_model()` via [`Self::set_allowed_tool_names`].
    /// When `Some`, only these tools can be executed; all others get `NotFound`.
    /// When `None` (default), all registered tools are executable.
    allowed_tool_names: Arc<RwLock<Option<HashSet<String>>>>,
}

impl StreamingToolExecutor {
    /// Create a new executor.
    pub fn new(
        registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
        event_tx: Option<mpsc::Sender<LoopEvent>>,
    ) -> Self {
        Self {
            registry,
            config,
            event_tx,
            cancel_token: CancellationToken::new(),
            approval_store: Arc::new(Mutex::new(ApprovalStore::new())),
            file_tracker: Arc::new(Mutex::new(FileTracker::new())),
            active_tasks: Arc::new(Mutex::new(HashMap::new())),
            pending_unsafe: Arc::new(Mutex::new(Vec::new())),
            completed_results: Arc::new(Mutex::new(Vec::new())),
            permission_requester: None,
            permission_evaluator: None,
            allowed_tool_names: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the cancellation token.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Set the approval store.
    pub fn with_approval_store(mut self, store: Arc<Mutex<ApprovalStore>>) -> Self {
        self.approval_store = store;
        self
    }

    /// Set the file tracker.
    pub fn with_file_tracker(mut self, tracker: Arc<Mutex<FileTracker>>) -> Self {
        self.file_tracker = tracker;
        self
    }

    /// Set the permission requester for interactive approval flow.
    pub fn with_permission_requester(mut self, requester: Arc<dyn PermissionRequester>) -> Self {
        self.permission_requester = Some(requester);
        self
    }

    /// Set the permission rule evaluator.
    pub fn with_permission_evaluator(mut self, evaluator: PermissionRuleEvaluator) -> Self {
        self.permission_evaluator = Some(evaluator);
        self
    }

    /// Set the allowlist of tool names that the model was given.
    ///
    /// Any tool call whose name is not in this set is rejected with
    /// `NotFound`, preventing hallucinated or injected calls to tools the
    /// model was never offered.
    pub fn set_allowed_tool_names(&self, names: HashSet<String>) {
        *self.allowed_tool_names.write().unwrap() = Some(names);
    }

    fn is_tool_allowed(&self, name: &str) -> bool {
        match self.allowed_tool_names.read().unwrap().as_ref() {
            None => true,
            Some(set) => set.contains(name),
        }
    }

    /// Called when a tool_use block completes during streaming.
    ///
    /// For safe tools, execution starts immediately.
    /// For unsafe tools, they are queued for later execution.
    pub async fn on_tool_complete(&self, tool_call: ToolCall) {
        let call_id = &tool_call.id;
        let name = &tool_call.name;

        debug!(call_id = %call_id, name = %name, "Tool use complete");

        if !self.is_tool_allowed(name) {
            debug!(call_id = %call_id, name = %name, "Tool not in allowed set, rejecting");
            let result =
                Err(crate::error::tool_error::NotFoundSnafu { name: name.clone() }.build());
            self.emit_completed(call_id, &result).await;
            self.completed_results.lock().await.push(ToolExecutionResult {
                call_id: call_id.clone(),
                name: name.clone(),
                result,
            });
            return;
        }

        self.emit_event(LoopEvent::ToolUseQueued {
            call_id: call_id.clone(),
            name: name.clone(),
            input: tool_call.arguments.clone(),
        })
        .await;

        let tool = match self.registry.get(name) {
            Some(t) => t,
            None => {
                self.pending_unsafe.lock().await.push(PendingToolCall {
                    tool_call,
                    queued_at: std::time::Instant::now(),
                });
                return;
            }
        };

        let is_safe = tool.is_concurrency_safe_for(&tool_call.arguments);

        if is_safe {
            let active_count = self.active_tasks.lock().await.len();
            if active_count >= self.config.max_concurrency as usize {
                self.pending_unsafe.lock().await.push(PendingToolCall {
                    tool_call,
                    queued_at: std::time::Instant::now(),
                });
                return;
            }
            self.start_tool_execution(tool_call).await;
        } else {
            self.pending_unsafe.lock().await.push(PendingToolCall {
                tool_call,
                queued_at: std::time::Instant::now(),
            });
        }
    }

    /// Start tool execution in a background task.
    async fn start_tool_execution(&self, tool_call: ToolCall) {
        let call_id = tool_call.id.clone();
        let name = tool_call.name.clone();

        self.emit_event(LoopEvent::ToolUseStarted {
            call_id: call_id.clone(),
            name: name.clone(),
        })
        .await;

        let ctx = self.create_context(&call_id);
        let registry = self.registry.clone();
        let timeout_secs = self.config.default_timeout_secs;
        let session_dir = self.config.session_dir.clone();
        let tool_config = self.config.tool_config.clone();
        let max_tool_output_chars = self.config.max_tool_output_chars;
        let permission_evaluator = self.permission_evaluator.clone();
        let permission_requester = self.permission_requester.clone();

        let task_call_id = call_id.clone();
        let task_name = name.clone();
        let handle = tokio::spawn(async move {
            let result = execute_tool(
                &registry,
                tool_call,
                ctx,
                timeout_secs,
                max_tool_output_chars,
                session_dir.as_deref(),
                &tool_config,
                permission_evaluator.as_ref(),
                permission_requester.as_deref(),
            )
            .await;

            ToolExecutionResult {
                call_id: task_call_id,
                name: task_name,
                result,
            }
        });

        self.active_tasks.lock().await.insert(call_id, handle);
    }

    /// Execute queued pending tools with dynamic scheduling.
    ///
    /// - Safe tools are spawned concurrently (up to `max_concurrency`).
    /// - When an unsafe tool is encountered, all active tasks are awaited first.
    pub async fn execute_pending_unsafe(&self) {
        let pending = {
            let mut lock = self.pending_unsafe.lock().await;
            std::mem::take(&mut *lock)
        };

        let mut queue = std::collections::VecDeque::from(pending);

        while let Some(pending_call) = queue.pop_front() {
            if self.cancel_token.is_cancelled() {
                break;
            }

            let tool_call = pending_call.tool_call;
            let call_id = tool_call.id.clone();
            let name = tool_call.name.clone();

            if !self.is_tool_allowed(&name) {
                debug!(call_id = %call_id, name = %name, "Tool not in allowed set, rejecting");
                let result =
                    Err(crate::error::tool_error::NotFoundSnafu { name: name.clone() }.build());
                self.emit_completed(&call_id, &result).await;
                self.completed_results.lock().await.push(ToolExecutionResult {
                    call_id,
                    name,
                    result,
                });
                continue;
            }

            let is_safe = self
                .registry
                .get(&name)
                .map(|tool| tool.is_concurrency_safe_for(&tool_call.arguments))
                .unwrap_or(false);

            if is_safe {
                let active_count = self.active_tasks.lock().await.len();
                if active_count >= self.config.max_concurrency as usize {
                    self.drain_one_active().await;
                }
                self.start_tool_execution(tool_call).await;
            } else {
                self.drain_active_tasks().await;
                self.execute_single_tool(tool_call).await;
            }
        }

        self.drain_active_tasks().await;
    }

    /// Execute a single tool synchronously (for unsafe tools in the pending queue).
    async fn execute_single_tool(&self, tool_call: ToolCall) {
        let call_id = tool_call.id.clone();
        let name = tool_call.name.clone();

        self.emit_event(LoopEvent::ToolUseStarted {
            call_id: call_id.clone(),
            name: name.clone(),
        })
        .await;

        let ctx = self.create_context(&call_id);
        let result = execute_tool(
            &self.registry,
            tool_call,
            ctx,
            self.config.default_timeout_secs,
            self.config.max_tool_output_chars,
            self.config.session_dir.as_deref(),
            &self.config.tool_config,
            self.permission_evaluator.as_ref(),
            self.permission_requester.as_deref(),
        )
        .await;

        self.emit_completed(&call_id, &result).await;
        self.completed_results.lock().await.push(ToolExecutionResult {
            call_id,
            name,
            result,
        });
    }

    /// Wait for all active tasks to complete and collect their results.
    async fn drain_active_tasks(&self) {
        let tasks: Vec<_> = {
            let mut lock = self.active_tasks.lock().await;
            lock.drain().collect()
        };

        for (call_id, handle) in tasks {
            match handle.await {
                Ok(result) => {
                    self.emit_completed(&result.call_id, &result.result).await;
                    self.completed_results.lock().await.push(result);
                }
                Err(e) => {
                    error!(call_id = %call_id, error = %e, "Task panicked");
                    let result = Err(crate::error::tool_error::InternalSnafu {
                        message: format!("Tool execution task panicked (call_id: {call_id}): {e}"),
                    }
                    .build());
                    self.emit_completed(&call_id, &result).await;
                    self.completed_results.lock().await.push(ToolExecutionResult {
                        call_id: call_id.clone(),
                        name: format!("<panicked:{call_id}>"),
                        result,
                    });
                }
            }
        }
    }

    /// Wait for one active task to complete and collect its result.
    async fn drain_one_active(&self) {
        let entry = {
            let mut lock = self.active_tasks.lock().await;
            let key = lock.keys().next().cloned();
            key.and_then(|k| lock.remove(&k).map(|h| (k, h)))
        };

        if let Some((call_id, handle)) = entry {
            match handle.await {
                Ok(result) => {
                    self.emit_completed(&result.call_id, &result.result).await;
                    self.completed_results.lock().await.push(result);
                }
                Err(e) => {
                    error!(call_id = %call_id, error = %e, "Task panicked");
                    let result = Err(crate::error::tool_error::InternalSnafu {
                        message: format!("Tool execution task panicked (call_id: {call_id}): {e}"),
                    }
                    .build());
                    self.emit_completed(&call_id, &result).await;
                    self.completed_results.lock().await.push(ToolExecutionResult {
                        call_id: call_id.clone(),
                        name: format!("<panicked:{call_id}>"),
                        result,
                    });
                }
            }
        }
    }

    /// Wait for all active tasks and return their results.
    pub async fn drain(&self) -> Vec<ToolExecutionResult> {
        self.drain_active_tasks().await;
        let mut results = self.completed_results.lock().await;
        std::mem::take(&mut *results)
    }

    /// Abort a running tool by call ID.
    pub async fn abort(&self, call_id: &str, reason: AbortReason) {
        info!(call_id = %call_id, reason = ?reason, "Aborting tool");

        if let Some(handle) = self.active_tasks.lock().await.remove(call_id) {
            handle.abort();
        }

        self.emit_event(LoopEvent::ToolExecutionAborted { reason }).await;
    }

    /// Abort all running and pending tools.
    pub async fn abort_all(&self, reason: AbortReason) {
        let tasks: Vec<_> = {
            let mut lock = self.active_tasks.lock().await;
            lock.drain().collect()
        };

        for (_, handle) in tasks {
            handle.abort();
        }

        self.pending_unsafe.lock().await.clear();
        self.emit_event(LoopEvent::ToolExecutionAborted { reason }).await;
    }

    /// Get the number of active tasks.
    pub async fn active_count(&self) -> usize {
        self.active_tasks.lock().await.len()
    }

    /// Get the number of pending unsafe tasks.
    pub async fn pending_count(&self) -> usize {
        self.pending_unsafe.lock().await.len()
    }

    /// Create a tool context for execution.
    fn create_context(&self, call_id: &str) -> ToolContext {
        ToolContextBuilder::new(call_id, &self.config.session_id)
            .cwd(self.config.cwd.clone())
            .permission_mode(self.config.permission_mode)
            .cancel_token(self.cancel_token.clone())
            .approval_store(self.approval_store.clone())
            .file_tracker(self.file_tracker.clone())
            .plan_mode(self.config.is_plan_mode, self.config.plan_file_path.clone())
            .build()
    }

    /// Emit a loop event.
    async fn emit_event(&self, event: LoopEvent) {
        if let Some(tx) = &self.event_tx {
            if let Err(e) = tx.send(event).await {
                debug!("Failed to send tool event: {e}");
            }
        }
    }

    /// Emit a completed event.
    async fn emit_completed(&self, call_id: &str, result: &Result<ToolOutput>) {
        let (output, is_error) = match result {
            Ok(output) => (output.content.clone(), output.is_error),
            Err(e) => (
                turnkit_protocol::ToolResultContent::Text(e.to_string()),
                true,
            ),
        };

        self.emit_event(LoopEvent::ToolUseCompleted {
            call_id: call_id.to_string(),
            output,
            is_error,
        })
        .await;
    }
}

/// Execute a single tool with timeout and cancellation support.
#[allow(clippy::too_many_arguments)]
async fn execute_tool(
    registry: &ToolRegistry,
    tool_call: ToolCall,
    mut ctx: ToolContext,
    timeout_secs: i64,
    max_tool_output_chars: Option<i32>,
    session_dir: Option<&Path>,
    tool_config: &ToolConfig,
    permission_evaluator: Option<&PermissionRuleEvaluator>,
    permission_requester: Option<&(dyn PermissionRequester)>,
) -> Result<ToolOutput> {
    let timeout_duration = std::time::Duration::from_secs(timeout_secs as u64);
    let cancel_token = ctx.cancel_token.clone();

    tokio::select! {
        biased;
        _ = cancel_token.cancelled() => {
            Err(crate::error::tool_error::CancelledSnafu.build())
        }
        result = tokio::time::timeout(
            timeout_duration,
            execute_tool_inner(
                registry,
                tool_call,
                &mut ctx,
                max_tool_output_chars,
                session_dir,
                tool_config,
                permission_evaluator,
                permission_requester,
            ),
        ) => {
            match result {
                Ok(inner) => inner,
                Err(_) => Err(crate::error::tool_error::TimeoutSnafu { timeout_secs }.build()),
            }
        }
    }
}

/// Check if a tool name is an edit/write tool (for AcceptEdits mode).
fn is_edit_tool(name: &str) -> bool {
    matches!(name, "Edit" | "Write")
}

/// Check if a tool name is read-only for plan mode purposes.
fn is_read_only_or_plan_tool(name: &str) -> bool {
    matches!(name, "Read" | "Glob" | "Grep")
}

/// Extract file_path from tool input if present.
fn extract_file_path(input: &Value) -> Option<PathBuf> {
    input.get("file_path").and_then(|v| v.as_str()).map(PathBuf::from)
}

/// Extract a command prefix pattern for the "allow similar commands" option.
///
/// For Bash commands, extracts the first word as a prefix pattern.
/// E.g. `"git push origin main"` → `Some("git *")`.
fn extract_prefix_pattern(tool_name: &str, input: &Value) -> Option<String> {
    if tool_name != "Bash" {
        return None;
    }
    let command = input.get("command").and_then(|v| v.as_str())?;
    let first_word = command.split_whitespace().next()?;
    if first_word.is_empty() {
        return None;
    }
    Some(format!("{first_word} *"))
}

/// Build a default approval request for a tool that needs user approval.
fn default_approval_request(name: &str, input: &Value) -> turnkit_protocol::ApprovalRequest {
    let description = if let Some(path) = extract_file_path(input) {
        format!("{name}: {}", path.display())
    } else if let Some(cmd) = input.get("command").and_then(|v| v.as_str()) {
        let truncated = if cmd.len() > 80 {
            format!("{}...", &cmd[..80])
        } else {
            cmd.to_string()
        };
        format!("{name}: {truncated}")
    } else {
        format!("Execute tool: {name}")
    };

    let proposed_prefix_pattern = extract_prefix_pattern(name, input);

    turnkit_protocol::ApprovalRequest {
        request_id: format!(
            "default-{name}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        ),
        tool_name: name.to_string(),
        description,
        risks: vec![],
        allow_remember: true,
        proposed_prefix_pattern,
    }
}

/// Extract a command string from a Bash tool call's input.
fn extract_command_input(name: &str, input: &Value) -> Option<String> {
    if name != "Bash" {
        return None;
    }
    input.get("command").and_then(|v| v.as_str()).map(String::from)
}

/// Full permission pipeline aligned with the registry's permission engine.
///
/// 1. Check DENY rules → if match → Deny
/// 2. Check ASK rules → if match → NeedsApproval
/// 3. Tool-specific `check_permission()`
/// 4. Check ALLOW rules → if match → Allow
/// 5. Default behavior: read-only → Allow, mutating → NeedsApproval
async fn check_permission_pipeline(
    tool: &dyn crate::tool::Tool,
    name: &str,
    input: &Value,
    ctx: &ToolContext,
    evaluator: Option<&PermissionRuleEvaluator>,
) -> PermissionResult {
    let file_path = extract_file_path(input);
    let command_input = extract_command_input(name, input);

    if let Some(evaluator) = evaluator {
        if let Some(decision) =
            evaluator.evaluate_behavior(name, file_path.as_deref(), RuleAction::Deny, command_input.as_deref())
        {
            return PermissionResult::Denied {
                reason: decision.reason,
            };
        }

        if let Some(decision) =
            evaluator.evaluate_behavior(name, file_path.as_deref(), RuleAction::Ask, command_input.as_deref())
        {
            return PermissionResult::NeedsApproval {
                request: turnkit_protocol::ApprovalRequest {
                    request_id: format!("rule-ask-{name}"),
                    tool_name: name.to_string(),
                    description: decision.reason,
                    risks: vec![],
                    allow_remember: true,
                    proposed_prefix_pattern: extract_prefix_pattern(name, input),
                },
            };
        }
    }

    let tool_result = tool.check_permission(input, ctx).await;
    if !tool_result.is_passthrough() {
        return tool_result;
    }

    if let Some(evaluator) = evaluator {
        if let Some(decision) = evaluator.evaluate_behavior(
            name,
            file_path.as_deref(),
            RuleAction::Allow,
            command_input.as_deref(),
        ) {
            if decision.is_allowed() {
                return PermissionResult::Allowed;
            }
        }
    }

    if tool.is_read_only() {
        PermissionResult::Allowed
    } else {
        PermissionResult::NeedsApproval {
            request: default_approval_request(name, input),
        }
    }
}

/// Apply permission mode on top of pipeline result.
fn apply_permission_mode(result: PermissionResult, mode: PermissionMode, tool_name: &str) -> PermissionResult {
    match mode {
        PermissionMode::Bypass => PermissionResult::Allowed,
        PermissionMode::AcceptEdits if is_edit_tool(tool_name) => match result {
            PermissionResult::NeedsApproval { .. } => PermissionResult::Allowed,
            other => other,
        },
        PermissionMode::Plan if !is_read_only_or_plan_tool(tool_name) => match result {
            PermissionResult::Allowed | PermissionResult::NeedsApproval { .. } => PermissionResult::Denied {
                reason: "Plan mode: only read-only tools are allowed".to_string(),
            },
            other => other,
        },
        _ => result,
    }
}

/// Inner tool execution logic (without timeout).
#[allow(clippy::too_many_arguments)]
async fn execute_tool_inner(
    registry: &ToolRegistry,
    tool_call: ToolCall,
    ctx: &mut ToolContext,
    max_tool_output_chars: Option<i32>,
    session_dir: Option<&Path>,
    tool_config: &ToolConfig,
    permission_evaluator: Option<&PermissionRuleEvaluator>,
    permission_requester: Option<&(dyn PermissionRequester)>,
) -> Result<ToolOutput> {
    let call_id = &tool_call.id;
    let name = &tool_call.name;
    let input = tool_call.arguments;

    let tool = registry
        .get(name)
        .ok_or_else(|| crate::error::tool_error::NotFoundSnafu { name: name.clone() }.build())?;

    let validation = tool.validate(&input).await;
    if let ValidationResult::Invalid { errors } = validation {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        return Err(crate::error::tool_error::InvalidInputSnafu {
            message: error_msgs.join(", "),
        }
        .build());
    }

    let pipeline_result =
        check_permission_pipeline(tool.as_ref(), name, &input, ctx, permission_evaluator).await;
    let permission = apply_permission_mode(pipeline_result, ctx.permission_mode, name);

    match permission {
        PermissionResult::Allowed => {}
        PermissionResult::Denied { reason } => {
            return Err(crate::error::tool_error::PermissionDeniedSnafu { message: reason }.build());
        }
        PermissionResult::NeedsApproval { request } => {
            let pattern = &request.description;
            if ctx.is_approved(name, pattern).await {
                // Already approved for this pattern.
            } else if let Some(requester) = permission_requester {
                let worker_id = ctx.call_id.clone();
                let decision = requester.request_permission(request.clone(), &worker_id).await;
                match decision {
                    ApprovalDecision::Denied => {
                        return Err(crate::error::tool_error::PermissionDeniedSnafu {
                            message: format!("User denied permission for tool '{name}'"),
                        }
                        .build());
                    }
                    ApprovalDecision::Approved => {
                        ctx.approve_pattern(name, pattern).await;
                    }
                    ApprovalDecision::ApprovedWithPrefix { prefix_pattern } => {
                        ctx.approve_pattern(name, &prefix_pattern).await;
                    }
                }
            } else {
                return Err(crate::error::tool_error::PermissionDeniedSnafu {
                    message: format!("Tool '{name}' requires approval: {}", request.description),
                }
                .build());
            }
        }
        PermissionResult::Passthrough => {
            // Pipeline always resolves to one of the other variants.
        }
    }

    let result = tool.execute(input, ctx).await;

    let mut output = match result {
        Ok(output) => tool.post_process(output, ctx).await,
        Err(e) => return Err(e),
    };

    if let Some(dir) = session_dir {
        output = result_persistence::persist_if_needed(output, call_id, dir, tool_config).await;
    }

    let per_tool_limit = tool.max_result_size_chars() as usize;
    let max_chars = match max_tool_output_chars {
        Some(model_limit) => per_tool_limit.min(model_limit as usize),
        None => per_tool_limit,
    };
    output.truncate_to(max_chars);

    tool.cleanup(ctx).await;

    Ok(output)
}

impl std::fmt::Debug for StreamingToolExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingToolExecutor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "executor.test.rs"]
mod tests;
