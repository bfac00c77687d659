//! The [`Model`] trait: a single model handle behind a narrow streaming interface.

use crate::error::HyperError;
use crate::stream::StreamOptions;
use crate::stream::StreamResult;
use async_trait::async_trait;
use std::fmt::Debug;

/// Static facts about a model, returned by [`Provider::get_models`](crate::provider::Provider).
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub id: String,
    pub display_name: String,
    pub context_window: i64,
    pub supports_tools: bool,
    pub supports_reasoning: bool,
}

/// A single addressable model, reached through [`crate::provider::Provider::model`].
#[async_trait]
pub trait Model: Debug + Send + Sync {
    /// The model's id, as passed to `Provider::model`.
    fn id(&self) -> &str;

    /// Begin a streaming generation. Implementations must honor
    /// `options.abort_signal` promptly: once cancelled, no further parts
    /// should be emitted and the stream should end.
    async fn stream(&self, options: StreamOptions) -> Result<StreamResult, HyperError>;
}

#[cfg(test)]
#[path = "model.test.rs"]
mod tests;
