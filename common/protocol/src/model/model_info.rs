//! Resolved model metadata: capabilities, context limits, and the thinking
//! levels a model accepts, merged from builtin defaults through to a user's
//! `models.json` override.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::Capability;
use super::ReasoningSummary;
use crate::ThinkingLevel;
use crate::model::reasoning::nearest_effort;

/// Model metadata, layered: any field left `None` falls back to whatever a
/// lower-priority layer (builtin defaults, provider defaults) already set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier used to look this entry up.
    #[serde(default)]
    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_window: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<Capability>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_thinking_level: Option<ThinkingLevel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_thinking_levels: Option<Vec<ThinkingLevel>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_summary: Option<ReasoningSummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<i64>,

    /// Maximum characters a tool result may hand back to this model before
    /// the executor truncates it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tool_output_chars: Option<usize>,

    /// Tools this model must never be offered, regardless of registry
    /// contents (replaces, does not merge, on [`Self::merge_from`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_tools: Option<Vec<String>>,

    /// Free-form provider request options (e.g. `response_format`, `seed`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<HashMap<String, serde_json::Value>>,
}

impl ModelInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_context_window(mut self, context_window: i64) -> Self {
        self.context_window = Some(context_window);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: i64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn with_capabilities(mut self, capabilities: Vec<Capability>) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    pub fn with_thinking_level(mut self, level: ThinkingLevel) -> Self {
        self.default_thinking_level = Some(level);
        self
    }

    pub fn with_request_options(mut self, options: HashMap<String, serde_json::Value>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities
            .as_ref()
            .is_some_and(|caps| caps.contains(&capability))
    }

    pub fn get_request_option(&self, key: &str) -> Option<&serde_json::Value> {
        self.options.as_ref().and_then(|opts| opts.get(key))
    }

    /// Overwrite every field where `other` carries a value, preserving this
    /// instance's value wherever `other` is `None`. `options` and
    /// `excluded_tools`/`capabilities` are replaced wholesale except
    /// `options`, whose keys are merged (later layer wins per key).
    pub fn merge_from(&mut self, other: &Self) {
        if !other.slug.is_empty() {
            self.slug = other.slug.clone();
        }
        if other.display_name.is_some() {
            self.display_name = other.display_name.clone();
        }
        if other.context_window.is_some() {
            self.context_window = other.context_window;
        }
        if other.max_output_tokens.is_some() {
            self.max_output_tokens = other.max_output_tokens;
        }
        if other.capabilities.is_some() {
            self.capabilities = other.capabilities.clone();
        }
        if other.temperature.is_some() {
            self.temperature = other.temperature;
        }
        if other.default_thinking_level.is_some() {
            self.default_thinking_level = other.default_thinking_level;
        }
        if other.supported_thinking_levels.is_some() {
            self.supported_thinking_levels = other.supported_thinking_levels.clone();
        }
        if other.reasoning_summary.is_some() {
            self.reasoning_summary = other.reasoning_summary;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.max_tool_output_chars.is_some() {
            self.max_tool_output_chars = other.max_tool_output_chars;
        }
        if other.excluded_tools.is_some() {
            self.excluded_tools = other.excluded_tools.clone();
        }
        match (&mut self.options, &other.options) {
            (Some(base), Some(other_opts)) => {
                for (k, v) in other_opts {
                    base.insert(k.clone(), v.clone());
                }
            }
            (None, Some(other_opts)) => {
                self.options = Some(other_opts.clone());
            }
            _ => {}
        }
    }

    /// Find the configured thinking level closest in effort to `requested`,
    /// or `None` if this model declares no supported levels at all.
    pub fn nearest_supported_level(&self, requested: &ThinkingLevel) -> Option<ThinkingLevel> {
        let supported = self.supported_thinking_levels.as_ref()?;
        if supported.is_empty() {
            return None;
        }
        let efforts: Vec<_> = supported.iter().map(|level| level.effort).collect();
        let nearest = nearest_effort(requested.effort, &efforts);
        supported.iter().find(|level| level.effort == nearest).copied()
    }

    /// Like [`Self::nearest_supported_level`], but falls back to returning
    /// `requested` unchanged when this model declares no supported levels.
    pub fn resolve_thinking_level(&self, requested: &ThinkingLevel) -> ThinkingLevel {
        self.nearest_supported_level(requested).unwrap_or(*requested)
    }
}

#[cfg(test)]
#[path = "model_info.test.rs"]
mod tests;
