//! Permission and approval types shared between the permission engine, the
//! approval broker, and the turn engine's event stream.

use serde::Deserialize;
use serde::Serialize;

/// The agent's current operating mode, selecting a default permission
/// posture for mutating tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionMode {
    /// Mutating tools require approval (default posture).
    #[default]
    Default,
    /// Read-only bias: mutating tools are denied outright.
    Plan,
    /// Mutating file edits are auto-approved; other mutating tools still ask.
    AcceptEdits,
    /// Every tool call is auto-approved. Use with care.
    Bypass,
}

impl PermissionMode {
    /// Whether a file-mutating tool needs an approval prompt in this mode.
    pub fn requires_write_approval(&self) -> bool {
        matches!(self, Self::Default | Self::Plan)
    }

    /// Whether file edits are accepted without prompting.
    pub fn auto_accept_edits(&self) -> bool {
        matches!(self, Self::AcceptEdits | Self::Bypass)
    }

    /// Whether every tool call bypasses approval entirely.
    pub fn is_bypass(&self) -> bool {
        matches!(self, Self::Bypass)
    }
}

/// The resolved action for a tool call after evaluating the permission
/// ruleset: deny dominates ask dominates allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionBehavior {
    Allow,
    #[default]
    Ask,
    Deny,
}

impl PermissionBehavior {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    pub fn requires_approval(&self) -> bool {
        matches!(self, Self::Ask)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Deny)
    }
}

/// Where a permission rule originated. Lower-ordinal sources win ties when
/// more than one rule matches a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSource {
    /// Approved for this session only ("allow all this run").
    Session,
    /// Supplied on the command that started this invocation.
    Command,
    /// Passed on the CLI invocation.
    Cli,
    /// Set via an explicit runtime flag/override.
    Flag,
    /// Local, per-user override file.
    Local,
    /// Project-level configuration, checked into the repo.
    Project,
    /// Organization-wide policy.
    Policy,
    /// User-level default configuration.
    User,
}

/// The outcome of evaluating permission rules for one tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionDecision {
    pub allowed: bool,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<RuleSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_pattern: Option<String>,
}

impl PermissionDecision {
    pub fn allowed(reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            reason: reason.into(),
            source: None,
            matched_pattern: None,
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
            source: None,
            matched_pattern: None,
        }
    }

    pub fn with_source(mut self, source: RuleSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.matched_pattern = Some(pattern.into());
        self
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}

/// The outcome of a tool's `check_permission` hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PermissionResult {
    /// Proceed without a prompt.
    Allowed,
    /// Refused outright; the tool call never runs.
    Denied { reason: String },
    /// A human must decide before the tool runs.
    NeedsApproval { request: ApprovalRequest },
    /// The tool has no opinion; fall through to the ruleset's default.
    Passthrough,
}

impl PermissionResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }

    pub fn needs_approval(&self) -> bool {
        matches!(self, Self::NeedsApproval { .. })
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Passthrough)
    }
}

/// A request for a human decision on a tool call, carrying enough context
/// for a UI to explain why approval is being asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub request_id: String,
    pub tool_name: String,
    pub description: String,
    pub risks: Vec<SecurityRisk>,
    pub allow_remember: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_prefix_pattern: Option<String>,
}

/// The user's response to an [`ApprovalRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "kebab-case")]
pub enum ApprovalDecision {
    Approved,
    /// Approve this call and remember a prefix pattern for future calls.
    ApprovedWithPrefix { prefix_pattern: String },
    Denied,
}

/// The kind of risk a tool call poses, surfaced to the approval UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskType {
    /// May delete or overwrite data irreversibly.
    Destructive,
    /// Touches credentials or key material.
    SensitiveFile,
    /// Touches version-control or package-manager internals.
    LockedPath,
    /// Reaches outside the workspace root.
    ExternalPath,
    /// Executes a shell command with unparsed metacharacters.
    ShellInjection,
    /// Starts a long-running or network-exposed process.
    NetworkExposure,
}

/// Severity of a [`SecurityRisk`], ordered low to critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskSeverity {
    pub fn at_least(&self, floor: RiskSeverity) -> bool {
        *self >= floor
    }
}

/// One specific risk contributing to an approval prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRisk {
    pub risk_type: RiskType,
    pub severity: RiskSeverity,
    pub message: String,
}

#[cfg(test)]
#[path = "permission.test.rs"]
mod tests;
