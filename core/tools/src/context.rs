//! Tool execution context.
//!
//! This module provides [`ToolContext`] which contains all the context
//! needed for tool execution, including permissions, event channels,
//! and cancellation support.

use turnkit_protocol::{ApprovalDecision, ApprovalRequest, LoopEvent, PermissionMode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::Digest;
use sha2::Sha256;
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

/// Content hash of a file at the moment it was last read through the
/// ledger, used to detect edits made outside the tool's read-modify cycle.
///
/// Edit and Write require the file on disk to still match the hash
/// recorded here before they touch it: a mismatch means the file changed
/// since it was read, and the tool must fail rather than clobber it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReadState {
    pub hash: String,
    pub mtime: Option<SystemTime>,
}

impl FileReadState {
    /// Record a read of `content`, hashed, alongside the file's mtime at
    /// read time (`None` if it couldn't be determined).
    pub fn complete(content: impl AsRef<str>, mtime: Option<SystemTime>) -> Self {
        Self {
            hash: Self::compute_hash(content.as_ref().as_bytes()),
            mtime,
        }
    }

    /// SHA-256 of `content`, hex-encoded.
    pub fn compute_hash(content: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        format!("{:x}", hasher.finalize())
    }
}

/// Stored approvals for tools.
///
/// Patterns support a trailing-wildcard shorthand so a single approval can
/// cover a family of invocations (e.g. approving `git *` for `Bash` covers
/// any `git` subcommand) — see [`ApprovalStore::matches_wildcard`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApprovalStore {
    /// Approved patterns, keyed by tool name.
    approved_patterns: HashMap<String, Vec<String>>,
    /// Session-wide approvals.
    session_approvals: HashSet<String>,
}

impl ApprovalStore {
    /// Create a new empty approval store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a tool action is approved, either because the whole tool
    /// was approved for the session or because `pattern` matches one of
    /// the tool's approved patterns.
    pub fn is_approved(&self, tool_name: &str, pattern: &str) -> bool {
        if self.session_approvals.contains(tool_name) {
            return true;
        }
        self.approved_patterns
            .get(tool_name)
            .is_some_and(|patterns| {
                patterns
                    .iter()
                    .any(|approved| Self::matches_wildcard(approved, pattern))
            })
    }

    /// Add an approval for a specific pattern.
    pub fn approve_pattern(&mut self, tool_name: &str, pattern: &str) {
        self.approved_patterns
            .entry(tool_name.to_string())
            .or_default()
            .push(pattern.to_string());
    }

    /// Add a session-wide approval for a tool.
    pub fn approve_session(&mut self, tool_name: &str) {
        self.session_approvals.insert(tool_name.to_string());
    }

    /// Clear all approvals.
    pub fn clear(&mut self) {
        self.approved_patterns.clear();
        self.session_approvals.clear();
    }

    /// Matches `candidate` against an approved `pattern`.
    ///
    /// - `*` matches anything.
    /// - `prefix *` (a trailing space then star) matches `prefix` exactly
    ///   or anything starting with `"prefix "` — e.g. `git *` covers
    ///   `git push origin main` and bare `git`, but not `gitx`.
    /// - `prefix*` (no space before the star) matches anything starting
    ///   with `prefix`, including `prefixx`.
    /// - Otherwise, an exact match is required.
    pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
        if pattern == "*" {
            return true;
        }
        if let Some(prefix) = pattern.strip_suffix(" *") {
            return candidate == prefix || candidate.starts_with(&format!("{prefix} "));
        }
        if let Some(prefix) = pattern.strip_suffix('*') {
            return candidate.starts_with(prefix);
        }
        pattern == candidate
    }
}

/// Asks a human to decide on a tool call that needs approval, in the moment.
///
/// Implemented by the driver, which owns whatever UI or channel actually
/// surfaces the prompt; the executor never renders one itself.
#[async_trait]
pub trait PermissionRequester: Send + Sync {
    async fn request_permission(&self, request: ApprovalRequest, requester_id: &str) -> ApprovalDecision;
}

/// Tracks files that have been read or modified.
#[derive(Debug, Clone, Default)]
pub struct FileTracker {
    /// Files that have been read.
    read_files: HashSet<PathBuf>,
    /// Files that have been modified.
    modified_files: HashSet<PathBuf>,
    /// Content hash recorded at the most recent read of each file.
    read_states: HashMap<PathBuf, FileReadState>,
}

impl FileTracker {
    /// Create a new file tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file read.
    pub fn record_read(&mut self, path: impl Into<PathBuf>) {
        self.read_files.insert(path.into());
    }

    /// Record a file read along with the content hash observed at read time.
    pub fn record_read_with_state(&mut self, path: impl Into<PathBuf>, state: FileReadState) {
        let path = path.into();
        self.read_files.insert(path.clone());
        self.read_states.insert(path, state);
    }

    /// The recorded read state for `path`, if it has been read with one.
    pub fn read_state(&self, path: &PathBuf) -> Option<&FileReadState> {
        self.read_states.get(path)
    }

    /// Record a file modification.
    pub fn record_modified(&mut self, path: impl Into<PathBuf>) {
        self.modified_files.insert(path.into());
    }

    /// Check if a file has been read.
    pub fn was_read(&self, path: &PathBuf) -> bool {
        self.read_files.contains(path)
    }

    /// Check if a file has been modified.
    pub fn was_modified(&self, path: &PathBuf) -> bool {
        self.modified_files.contains(path)
    }

    /// Get all read files.
    pub fn read_files(&self) -> &HashSet<PathBuf> {
        &self.read_files
    }

    /// Get all modified files.
    pub fn modified_files(&self) -> &HashSet<PathBuf> {
        &self.modified_files
    }
}

/// Context for tool execution.
///
/// This provides everything a tool needs during execution:
/// - Call identification
/// - Working directory
/// - Permission mode and approvals
/// - Event channel for progress updates
/// - Cancellation support
/// - File tracking
#[derive(Clone)]
pub struct ToolContext {
    /// Unique call ID for this execution.
    pub call_id: String,
    /// Session ID.
    pub session_id: String,
    /// Current working directory.
    pub cwd: PathBuf,
    /// Permission mode for this execution.
    pub permission_mode: PermissionMode,
    /// Channel for emitting loop events.
    pub event_tx: Option<mpsc::Sender<LoopEvent>>,
    /// Cancellation token for aborting execution.
    pub cancel_token: CancellationToken,
    /// Stored approvals.
    pub approval_store: Arc<Mutex<ApprovalStore>>,
    /// File tracker.
    pub file_tracker: Arc<Mutex<FileTracker>>,
    /// Whether the agent is currently restricted to plan mode.
    pub is_plan_mode: bool,
    /// The plan file plan mode still permits writing to, if any.
    pub plan_file_path: Option<PathBuf>,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(call_id: impl Into<String>, session_id: impl Into<String>, cwd: PathBuf) -> Self {
        Self {
            call_id: call_id.into(),
            session_id: session_id.into(),
            cwd,
            permission_mode: PermissionMode::Default,
            event_tx: None,
            cancel_token: CancellationToken::new(),
            approval_store: Arc::new(Mutex::new(ApprovalStore::new())),
            file_tracker: Arc::new(Mutex::new(FileTracker::new())),
            is_plan_mode: false,
            plan_file_path: None,
        }
    }

    /// Set the permission mode.
    pub fn with_permission_mode(mut self, mode: PermissionMode) -> Self {
        self.permission_mode = mode;
        self
    }

    /// Enter (or leave) plan mode, optionally naming the plan file that
    /// remains writable while restricted to plan mode.
    pub fn with_plan_mode(mut self, is_plan_mode: bool, plan_file_path: Option<PathBuf>) -> Self {
        self.is_plan_mode = is_plan_mode;
        self.plan_file_path = plan_file_path;
        self
    }

    /// Set the event channel.
    pub fn with_event_tx(mut self, tx: mpsc::Sender<LoopEvent>) -> Self {
        self.event_tx = Some(tx);
        self
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

    /// Emit a loop event.
    pub async fn emit_event(&self, event: LoopEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event).await;
        }
    }

    /// Emit tool progress.
    pub async fn emit_progress(&self, message: impl Into<String>) {
        self.emit_event(LoopEvent::ToolProgress {
            call_id: self.call_id.clone(),
            progress: turnkit_protocol::ToolProgressInfo {
                message: Some(message.into()),
                percentage: None,
                bytes_processed: None,
                total_bytes: None,
            },
        })
        .await;
    }

    /// Emit tool progress with percentage.
    pub async fn emit_progress_percent(&self, message: impl Into<String>, percentage: i32) {
        self.emit_event(LoopEvent::ToolProgress {
            call_id: self.call_id.clone(),
            progress: turnkit_protocol::ToolProgressInfo {
                message: Some(message.into()),
                percentage: Some(percentage),
                bytes_processed: None,
                total_bytes: None,
            },
        })
        .await;
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Wait for cancellation or completion.
    pub async fn cancelled(&self) {
        self.cancel_token.cancelled().await
    }

    /// Record a file read.
    pub async fn record_file_read(&self, path: impl Into<PathBuf>) {
        self.file_tracker.lock().await.record_read(path);
    }

    /// Record a file modification.
    pub async fn record_file_modified(&self, path: impl Into<PathBuf>) {
        self.file_tracker.lock().await.record_modified(path);
    }

    /// Record a file read along with its content hash, for staleness checks.
    pub async fn record_file_read_with_state(
        &self,
        path: impl Into<PathBuf>,
        state: FileReadState,
    ) {
        self.file_tracker
            .lock()
            .await
            .record_read_with_state(path, state);
    }

    /// The recorded read state for `path`, if any.
    pub async fn file_read_state(&self, path: &PathBuf) -> Option<FileReadState> {
        self.file_tracker.lock().await.read_state(path).cloned()
    }

    /// Check if a file was read.
    pub async fn was_file_read(&self, path: &PathBuf) -> bool {
        self.file_tracker.lock().await.was_read(path)
    }

    /// Check if a file was modified.
    pub async fn was_file_modified(&self, path: &PathBuf) -> bool {
        self.file_tracker.lock().await.was_modified(path)
    }

    /// Check if an action is approved.
    pub async fn is_approved(&self, tool_name: &str, pattern: &str) -> bool {
        self.approval_store
            .lock()
            .await
            .is_approved(tool_name, pattern)
    }

    /// Approve a specific pattern.
    pub async fn approve_pattern(&self, tool_name: &str, pattern: &str) {
        self.approval_store
            .lock()
            .await
            .approve_pattern(tool_name, pattern);
    }

    /// Approve a tool for the session.
    pub async fn approve_session(&self, tool_name: &str) {
        self.approval_store.lock().await.approve_session(tool_name);
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("call_id", &self.call_id)
            .field("session_id", &self.session_id)
            .field("cwd", &self.cwd)
            .field("permission_mode", &self.permission_mode)
            .field("is_cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// Builder for creating tool contexts.
pub struct ToolContextBuilder {
    call_id: String,
    session_id: String,
    cwd: PathBuf,
    permission_mode: PermissionMode,
    event_tx: Option<mpsc::Sender<LoopEvent>>,
    cancel_token: CancellationToken,
    approval_store: Arc<Mutex<ApprovalStore>>,
    file_tracker: Arc<Mutex<FileTracker>>,
    is_plan_mode: bool,
    plan_file_path: Option<PathBuf>,
}

impl ToolContextBuilder {
    /// Create a new builder.
    pub fn new(call_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            session_id: session_id.into(),
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
            permission_mode: PermissionMode::Default,
            event_tx: None,
            cancel_token: CancellationToken::new(),
            approval_store: Arc::new(Mutex::new(ApprovalStore::new())),
            file_tracker: Arc::new(Mutex::new(FileTracker::new())),
            is_plan_mode: false,
            plan_file_path: None,
        }
    }

    /// Enter plan mode, optionally naming the plan file that remains
    /// writable while restricted to it.
    pub fn plan_mode(mut self, is_plan_mode: bool, plan_file_path: Option<PathBuf>) -> Self {
        self.is_plan_mode = is_plan_mode;
        self.plan_file_path = plan_file_path;
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    /// Set the permission mode.
    pub fn permission_mode(mut self, mode: PermissionMode) -> Self {
        self.permission_mode = mode;
        self
    }

    /// Set the event channel.
    pub fn event_tx(mut self, tx: mpsc::Sender<LoopEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Set the cancellation token.
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Set the approval store.
    pub fn approval_store(mut self, store: Arc<Mutex<ApprovalStore>>) -> Self {
        self.approval_store = store;
        self
    }

    /// Set the file tracker.
    pub fn file_tracker(mut self, tracker: Arc<Mutex<FileTracker>>) -> Self {
        self.file_tracker = tracker;
        self
    }

    /// Build the context.
    pub fn build(self) -> ToolContext {
        ToolContext {
            call_id: self.call_id,
            session_id: self.session_id,
            cwd: self.cwd,
            permission_mode: self.permission_mode,
            event_tx: self.event_tx,
            cancel_token: self.cancel_token,
            approval_store: self.approval_store,
            file_tracker: self.file_tracker,
            is_plan_mode: self.is_plan_mode,
            plan_file_path: self.plan_file_path,
        }
    }
}

#[cfg(test)]
#[path = "context.test.rs"]
mod tests;
