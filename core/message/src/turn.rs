//! A `Turn` groups the user message and every assistant/tool message
//! produced while answering it. Turn boundaries are what the snapshot/undo
//! ledger keys its entries against.

use crate::tracked::TrackedMessage;
use std::time::Duration;
use std::time::Instant;
use turnkit_provider::ToolResultContent;

/// Token usage accumulated across a turn's rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: i64,
    pub output_tokens: i64,
}

impl TokenUsage {
    pub fn new(input_tokens: i64, output_tokens: i64) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    pub fn add(&mut self, other: TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

/// Why a tool call was abandoned before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    UserInterrupted,
    Timeout,
    TurnAborted,
}

/// Lifecycle of a single tool call within a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCallStatus {
    Pending,
    Running,
    Success,
    Failed { error: String },
    Aborted { reason: AbortReason },
}

impl ToolCallStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, ToolCallStatus::Running)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolCallStatus::Success)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ToolCallStatus::Success | ToolCallStatus::Failed { .. } | ToolCallStatus::Aborted { .. }
        )
    }
}

/// A tool call made during a turn, tracked from dispatch through result.
#[derive(Debug, Clone)]
pub struct TrackedToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
    pub status: ToolCallStatus,
    pub started_at: Option<Instant>,
    pub completed_at: Option<Instant>,
    pub output: Option<ToolResultContent>,
}

impl TrackedToolCall {
    pub fn from_parts(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
            status: ToolCallStatus::Pending,
            started_at: None,
            completed_at: None,
            output: None,
        }
    }

    pub fn start(&mut self) {
        self.status = ToolCallStatus::Running;
        self.started_at = Some(Instant::now());
    }

    pub fn complete(&mut self, output: ToolResultContent) {
        self.status = ToolCallStatus::Success;
        self.completed_at = Some(Instant::now());
        self.output = Some(output);
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = ToolCallStatus::Failed {
            error: error.into(),
        };
        self.completed_at = Some(Instant::now());
    }

    pub fn abort(&mut self, reason: AbortReason) {
        self.status = ToolCallStatus::Aborted { reason };
        self.completed_at = Some(Instant::now());
    }
}

/// One user message plus everything produced while answering it.
#[derive(Debug, Clone)]
pub struct Turn {
    pub number: i32,
    pub user_message: TrackedMessage,
    pub assistant_message: Option<TrackedMessage>,
    pub tool_calls: Vec<TrackedToolCall>,
    pub usage: TokenUsage,
    started_at: Instant,
    completed_at: Option<Instant>,
}

impl Turn {
    pub fn new(number: i32, user_message: TrackedMessage) -> Self {
        Self {
            number,
            user_message,
            assistant_message: None,
            tool_calls: Vec::new(),
            usage: TokenUsage::default(),
            started_at: Instant::now(),
            completed_at: None,
        }
    }

    pub fn set_assistant_message(&mut self, message: TrackedMessage) {
        self.assistant_message = Some(message);
    }

    pub fn update_usage(&mut self, usage: TokenUsage) {
        self.usage.add(usage);
    }

    pub fn add_tool_call(&mut self, call: TrackedToolCall) {
        self.tool_calls.push(call);
    }

    pub fn get_tool_call_mut(&mut self, id: &str) -> Option<&mut TrackedToolCall> {
        self.tool_calls.iter_mut().find(|tc| tc.id == id)
    }

    pub fn pending_tool_count(&self) -> usize {
        self.tool_calls
            .iter()
            .filter(|tc| !tc.status.is_terminal())
            .count()
    }

    pub fn all_tools_complete(&self) -> bool {
        self.pending_tool_count() == 0
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn complete(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    pub fn duration(&self) -> Option<Duration> {
        self.completed_at.map(|end| end.duration_since(self.started_at))
    }
}

#[cfg(test)]
#[path = "turn.test.rs"]
mod tests;
