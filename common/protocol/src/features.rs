//! Feature toggles gating optional turn-engine behavior.
//!
//! A single [`Features`] container is attached to the resolved config so
//! call sites consult one place instead of threading individual booleans
//! through every layer.

use std::collections::BTreeMap;

/// A togglable behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    /// Background (non-blocking) tool execution.
    BackgroundTasks,
    /// Micro-compaction of stale tool results mid-turn.
    MicroCompact,
    /// Session-memory extraction on full compaction.
    SessionMemory,
    /// Automatic model fallback on provider error.
    ModelFallback,
    /// Prompt-cache breakpoint insertion.
    PromptCaching,
    /// Stream-stall detection and recovery.
    StallRecovery,
    /// Gate on the `Ls` directory-listing tool.
    Ls,
    /// Gate on the `WebFetch` tool.
    WebFetch,
    /// Gate on the `WebSearch` tool.
    WebSearch,
    /// Gate on the `Lsp` code-intelligence tool.
    Lsp,
    /// LLM-assisted edit correction when string matching fails.
    SmartEdit,
}

impl Feature {
    fn key(self) -> &'static str {
        match self {
            Self::BackgroundTasks => "background_tasks",
            Self::MicroCompact => "micro_compact",
            Self::SessionMemory => "session_memory",
            Self::ModelFallback => "model_fallback",
            Self::PromptCaching => "prompt_caching",
            Self::StallRecovery => "stall_recovery",
            Self::Ls => "ls",
            Self::WebFetch => "web_fetch",
            Self::WebSearch => "web_search",
            Self::Lsp => "lsp",
            Self::SmartEdit => "smart_edit",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "background_tasks" => Some(Self::BackgroundTasks),
            "micro_compact" => Some(Self::MicroCompact),
            "session_memory" => Some(Self::SessionMemory),
            "model_fallback" => Some(Self::ModelFallback),
            "prompt_caching" => Some(Self::PromptCaching),
            "stall_recovery" => Some(Self::StallRecovery),
            "ls" => Some(Self::Ls),
            "web_fetch" => Some(Self::WebFetch),
            "web_search" => Some(Self::WebSearch),
            "lsp" => Some(Self::Lsp),
            "smart_edit" => Some(Self::SmartEdit),
            _ => None,
        }
    }

    fn all() -> &'static [Feature] {
        &[
            Self::BackgroundTasks,
            Self::MicroCompact,
            Self::SessionMemory,
            Self::ModelFallback,
            Self::PromptCaching,
            Self::StallRecovery,
            Self::Ls,
            Self::WebFetch,
            Self::WebSearch,
            Self::Lsp,
            Self::SmartEdit,
        ]
    }

    fn default_enabled(self) -> bool {
        true
    }
}

/// Resolved enabled/disabled state for every [`Feature`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Features {
    enabled: BTreeMap<Feature, bool>,
}

impl Features {
    /// All features at their built-in default state.
    pub fn with_defaults() -> Self {
        let enabled = Feature::all()
            .iter()
            .map(|f| (*f, f.default_enabled()))
            .collect();
        Self { enabled }
    }

    pub fn enabled(&self, feature: Feature) -> bool {
        self.enabled.get(&feature).copied().unwrap_or(true)
    }

    pub fn set(&mut self, feature: Feature, enabled: bool) {
        self.enabled.insert(feature, enabled);
    }

    /// Shorthand for `set(feature, false)`.
    pub fn disable(&mut self, feature: Feature) {
        self.set(feature, false);
    }

    /// Get a toggle by its config key (e.g. `"micro_compact"`).
    pub fn get(&self, key: &str) -> Option<bool> {
        Feature::from_key(key).map(|f| self.enabled(f))
    }

    /// Apply overrides keyed by config name, ignoring unknown keys.
    pub fn apply_map(&mut self, overrides: &BTreeMap<String, bool>) {
        for (key, value) in overrides {
            if let Some(feature) = Feature::from_key(key) {
                self.set(feature, *value);
            }
        }
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
#[path = "features.test.rs"]
mod tests;
