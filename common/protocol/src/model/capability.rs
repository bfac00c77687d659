//! Model capability flags.

use serde::Deserialize;
use serde::Serialize;

/// A feature a model may or may not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Basic text generation.
    TextGeneration,
    /// Streaming response support.
    Streaming,
    /// Vision/image input support.
    Vision,
    /// Audio input support.
    Audio,
    /// Tool/function calling support.
    ToolCalling,
    /// Embedding generation.
    Embedding,
    /// Extended thinking/reasoning support.
    ExtendedThinking,
    /// Structured output (JSON mode).
    StructuredOutput,
}
