//! Extended-thinking configuration for a single model invocation.

use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::model::ReasoningEffort;

/// How hard a model should think before answering, plus the provider-level
/// knobs (token budget, interleaving) that accompany the chosen effort.
///
/// Serializes as a bare string (`"high"`) when only `effort` is set, and as
/// an object when any of the other fields are non-default, so config files
/// that only care about the effort level stay terse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkingLevel {
    pub effort: ReasoningEffort,
    pub budget_tokens: Option<i64>,
    pub max_output_tokens: Option<i64>,
    pub interleaved: bool,
}

impl Default for ThinkingLevel {
    fn default() -> Self {
        Self::new(ReasoningEffort::None)
    }
}

impl ThinkingLevel {
    pub fn new(effort: ReasoningEffort) -> Self {
        Self {
            effort,
            budget_tokens: None,
            max_output_tokens: None,
            interleaved: false,
        }
    }

    pub fn with_budget(effort: ReasoningEffort, budget_tokens: i64) -> Self {
        Self::new(effort).set_budget(budget_tokens)
    }

    pub fn none() -> Self {
        Self::new(ReasoningEffort::None)
    }

    pub fn low() -> Self {
        Self::new(ReasoningEffort::Low)
    }

    pub fn medium() -> Self {
        Self::new(ReasoningEffort::Medium)
    }

    pub fn high() -> Self {
        Self::new(ReasoningEffort::High)
    }

    pub fn xhigh() -> Self {
        Self::new(ReasoningEffort::XHigh)
    }

    pub fn is_enabled(&self) -> bool {
        self.effort != ReasoningEffort::None
    }

    pub fn set_budget(mut self, budget_tokens: i64) -> Self {
        self.budget_tokens = Some(budget_tokens);
        self
    }

    pub fn set_max_output_tokens(mut self, max_output_tokens: i64) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn set_interleaved(mut self, interleaved: bool) -> Self {
        self.interleaved = interleaved;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(budget) = self.budget_tokens
            && budget < 0
        {
            return Err(format!("budget_tokens must be non-negative, got {budget}"));
        }
        if let Some(max) = self.max_output_tokens
            && max < 0
        {
            return Err(format!("max_output_tokens must be non-negative, got {max}"));
        }
        Ok(())
    }

    fn is_simple(&self) -> bool {
        self.budget_tokens.is_none() && self.max_output_tokens.is_none() && !self.interleaved
    }
}

impl std::fmt::Display for ThinkingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.effort)
    }
}

impl FromStr for ThinkingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let effort = match s {
            "none" => ReasoningEffort::None,
            "minimal" => ReasoningEffort::Minimal,
            "low" => ReasoningEffort::Low,
            "medium" => ReasoningEffort::Medium,
            "high" => ReasoningEffort::High,
            "xhigh" => ReasoningEffort::XHigh,
            other => return Err(format!("unknown thinking level: {other}")),
        };
        Ok(Self::new(effort))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ThinkingLevelRepr {
    Simple(ReasoningEffort),
    Detailed {
        effort: ReasoningEffort,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        budget_tokens: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_output_tokens: Option<i64>,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        interleaved: bool,
    },
}

impl Serialize for ThinkingLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.is_simple() {
            ThinkingLevelRepr::Simple(self.effort).serialize(serializer)
        } else {
            ThinkingLevelRepr::Detailed {
                effort: self.effort,
                budget_tokens: self.budget_tokens,
                max_output_tokens: self.max_output_tokens,
                interleaved: self.interleaved,
            }
            .serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for ThinkingLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match ThinkingLevelRepr::deserialize(deserializer)? {
            ThinkingLevelRepr::Simple(effort) => Ok(Self::new(effort)),
            ThinkingLevelRepr::Detailed {
                effort,
                budget_tokens,
                max_output_tokens,
                interleaved,
            } => Ok(Self {
                effort,
                budget_tokens,
                max_output_tokens,
                interleaved,
            }),
        }
    }
}

#[cfg(test)]
#[path = "thinking.test.rs"]
mod tests;
