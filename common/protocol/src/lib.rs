//! Shared wire types for the turn engine: the message/tool/event model every
//! other crate (provider client, turn loop, session store) speaks.
//!
//! - `model`: model capabilities, identity, and reasoning configuration
//! - [`ModelInfo`] / [`ProviderInfo`]: resolved, layered model and provider metadata
//! - [`LoopEvent`]: the tagged event stream emitted by a running turn
//! - [`PermissionMode`] / [`PermissionResult`] / [`ApprovalRequest`]: the permission and approval model
//! - [`ToolOutput`] / [`ValidationResult`]: the tool execution output contract
//! - [`CompactConfig`]: context-compaction tuning
//! - [`UserQueuedCommand`] / [`SteeringAttachment`]: mid-turn user input

mod agent_status;
mod attachment_config;
mod compact_config;
mod correlation;
mod features;
mod loop_config;
mod loop_event;
mod mcp_tool_info;
pub mod model;
mod path_config;
mod permission;
mod provider;
mod queue;
mod thinking;
mod tool_config;
mod tool_types;

pub use agent_status::AgentStatus;
pub use attachment_config::AttachmentConfig;
pub use compact_config::CompactConfig;
pub use compact_config::DEFAULT_CONTEXT_RESTORE_BUDGET;
pub use compact_config::DEFAULT_CONTEXT_RESTORE_MAX_FILES;
pub use compact_config::DEFAULT_MAX_TOKENS_PER_FILE;
pub use compact_config::DEFAULT_MICRO_COMPACT_MIN_SAVINGS;
pub use compact_config::DEFAULT_RECENT_TOOL_RESULTS_TO_KEEP;
pub use correlation::CorrelatedEvent;
pub use correlation::SubmissionId;
pub use features::Feature;
pub use features::Features;
pub use loop_config::CacheBreakpoint;
pub use loop_config::CacheType;
pub use loop_config::FileRestorationPriority;
pub use loop_config::LoopConfig;
pub use loop_config::PromptCachingConfig;
pub use loop_config::SessionMemoryConfig;
pub use loop_config::StallDetectionConfig;
pub use loop_config::StallRecovery;
pub use loop_event::AbortReason;
pub use loop_event::AgentProgress;
pub use loop_event::ApiErrorInfo;
pub use loop_event::AttachmentType;
pub use loop_event::CompactBoundaryMetadata;
pub use loop_event::CompactTelemetry;
pub use loop_event::CompactTrigger;
pub use loop_event::HookAdditionalContext;
pub use loop_event::HookEventType;
pub use loop_event::LoopError;
pub use loop_event::LoopEvent;
pub use loop_event::McpServerInfo;
pub use loop_event::McpStartupStatus;
pub use loop_event::MemoryAttachment;
pub use loop_event::PersistedToolResult;
pub use loop_event::RawStreamEvent;
pub use loop_event::RetryInfo;
pub use loop_event::TaskProgress;
pub use loop_event::TaskType;
pub use loop_event::TokenBreakdown;
pub use loop_event::TokenUsage;
pub use loop_event::TombstonedMessage;
pub use loop_event::ToolProgressInfo;
pub use loop_event::ToolResultContent;
pub use mcp_tool_info::McpAutoSearchConfig;
pub use mcp_tool_info::McpToolInfo;
pub use model::Capability;
pub use model::ConfigShellToolType;
pub use model::ModelInfo;
pub use model::ModelRole;
pub use model::ModelRoles;
pub use model::ModelSpec;
pub use model::ModelSpecParseError;
pub use model::ReasoningEffort;
pub use model::ReasoningSummary;
pub use model::RoleSelection;
pub use model::RoleSelections;
pub use model::effort_rank;
pub use model::nearest_effort;
pub use model::resolve_provider_type;
pub use path_config::PathConfig;
pub use permission::ApprovalDecision;
pub use permission::ApprovalRequest;
pub use permission::PermissionBehavior;
pub use permission::PermissionDecision;
pub use permission::PermissionMode;
pub use permission::PermissionResult;
pub use permission::RiskSeverity;
pub use permission::RiskType;
pub use permission::RuleSource;
pub use permission::SecurityRisk;
pub use provider::ProviderInfo;
pub use provider::ProviderModel;
pub use provider::ProviderType;
pub use provider::WireApi;
pub use queue::SteeringAttachment;
pub use queue::SteeringSource;
pub use queue::UserQueuedCommand;
pub use thinking::ThinkingLevel;
pub use tool_config::ApplyPatchToolType;
pub use tool_config::ToolConfig;
pub use tool_types::ConcurrencySafety;
pub use tool_types::ContextModifier;
pub use tool_types::ToolOutput;
pub use tool_types::ValidationError;
pub use tool_types::ValidationResult;
