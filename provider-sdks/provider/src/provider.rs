//! Provider configuration and the [`Provider`] trait.

use crate::error::HyperError;
use crate::model::Model;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// Connection settings shared by provider implementations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ProviderConfig {
    /// Create a config carrying the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: None,
            timeout_secs: None,
        }
    }

    /// Override the default API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Check that an API key is present.
    pub fn require_api_key(&self) -> Result<&str, HyperError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| HyperError::AuthenticationFailed("no API key configured".to_string()))
    }
}

/// A named source of models, behind a narrow interface so the engine never
/// depends on a provider's concrete wire format.
#[async_trait]
pub trait Provider: Debug + Send + Sync {
    /// The provider's canonical name, used as its registry key.
    fn name(&self) -> &str;

    /// Resolve a model handle by id without making a network call.
    fn model(&self, model_id: &str) -> Result<Arc<dyn Model>, HyperError>;
}

#[cfg(test)]
#[path = "provider.test.rs"]
mod tests;
