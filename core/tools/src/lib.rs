//! Tool registry, permission engine, and streaming executor (C4–C7).
//!
//! This crate owns everything a turn needs to run a tool call: the
//! [`Tool`] trait built-in tools implement, the [`ToolRegistry`] they
//! register into, the permission pipeline that decides whether a call
//! proceeds without asking, and the [`StreamingToolExecutor`] that runs
//! calls concurrently while respecting each tool's concurrency safety.

pub mod builtin;
pub mod context;
pub mod error;
pub mod executor;
pub mod permission_rules;
pub mod registry;
pub mod result_persistence;
pub mod sensitive_files;
pub mod tool;

pub use context::ApprovalStore;
pub use context::FileReadState;
pub use context::FileTracker;
pub use context::PermissionRequester;
pub use context::ToolContext;
pub use context::ToolContextBuilder;
pub use error::Result;
pub use error::ToolError;
pub use executor::ExecutorConfig;
pub use executor::StreamingToolExecutor;
pub use executor::ToolExecutionResult;
pub use permission_rules::PermissionRule;
pub use permission_rules::PermissionRuleEvaluator;
pub use permission_rules::RuleAction;
pub use registry::ToolRegistry;
pub use registry::mcp_tool_id;
pub use tool::Tool;
pub use tool::ToolOutputExt;

pub use builtin::BashTool;
pub use builtin::EditTool;
pub use builtin::GlobTool;
pub use builtin::GrepTool;
pub use builtin::ReadTool;
pub use builtin::WriteTool;
pub use builtin::builtin_tool_names;
pub use builtin::register_builtin_tools;
