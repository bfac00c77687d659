//! Streaming vocabulary shared by every [`crate::model::Model`] implementation.

use crate::error::HyperError;
use crate::messages::Message;
use crate::response::FinishReason;
use crate::response::TokenUsage;
use crate::tools::ToolChoice;
use crate::tools::ToolDefinition;
use futures::stream::BoxStream;
use tokio_util::sync::CancellationToken;

/// Input to [`crate::model::Model::stream`].
///
/// `messages` is the *effective history* the turn engine has already
/// assembled (after compaction); this module does not concern itself with
/// how that history was produced.
#[derive(Debug, Clone)]
pub struct StreamOptions {
    pub messages: Vec<Message>,
    pub tools: Option<Vec<ToolDefinition>>,
    pub tool_choice: Option<ToolChoice>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub max_tokens: Option<i32>,
    pub abort_signal: CancellationToken,
}

impl StreamOptions {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            tools: None,
            tool_choice: None,
            temperature: None,
            top_p: None,
            max_tokens: None,
            abort_signal: CancellationToken::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn with_tool_choice(mut self, choice: ToolChoice) -> Self {
        self.tool_choice = Some(choice);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_abort_signal(mut self, signal: CancellationToken) -> Self {
        self.abort_signal = signal;
        self
    }
}

/// One incremental unit of a model's streamed response.
#[derive(Debug, Clone)]
pub enum StreamPart {
    /// Incremental assistant-visible text.
    Text { delta: String },
    /// Incremental hidden reasoning/thinking text.
    Reasoning { delta: String },
    /// Incremental JSON-fragment for a tool call's arguments.
    ToolInputDelta {
        tool_call_id: String,
        index: usize,
        delta: String,
    },
    /// A fully assembled tool call, emitted once its arguments are complete.
    ToolCall {
        tool_call_id: String,
        name: String,
        arguments: serde_json::Value,
    },
    /// Terminal event carrying why generation stopped and token usage.
    Finish {
        reason: FinishReason,
        usage: Option<TokenUsage>,
    },
    /// A provider-reported error occurred mid-stream; no further parts follow.
    Error { error: HyperError },
}

impl StreamPart {
    pub fn is_finish(&self) -> bool {
        matches!(self, StreamPart::Finish { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StreamPart::Error { .. })
    }
}

/// The stream returned by [`crate::model::Model::stream`]: a sequence of
/// parts, each fallible so transport errors surface without closing the
/// stream abruptly.
pub type StreamResult = BoxStream<'static, Result<StreamPart, HyperError>>;

#[cfg(test)]
#[path = "stream.test.rs"]
mod tests;
