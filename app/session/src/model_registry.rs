//! Resolves a [`ModelSpec`] to a live [`Model`] handle.
//!
//! Providers are registered elsewhere (at process startup, against a
//! [`ProviderRegistry`]) behind the narrow [`Provider`] trait, so this
//! module never depends on a vendor's concrete wire format. `ModelRegistry`
//! just bridges configuration (which provider/model a role currently
//! points at) to the registry (which providers are actually wired up).

use std::sync::Arc;

use snafu::Location;
use snafu::OptionExt;
use snafu::ResultExt;
use snafu::Snafu;
use turnkit_config::ConfigError;
use turnkit_config::ConfigManager;
use turnkit_error::ErrorExt;
use turnkit_error::StatusCode;
use turnkit_error::stack_trace_debug;
use turnkit_protocol::model::ModelSpec;
use turnkit_provider::HyperError;
use turnkit_provider::Model;
use turnkit_provider::ProviderRegistry;

#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum ModelResolveError {
    #[snafu(display("config error resolving provider '{provider}'"))]
    Config {
        provider: String,
        source: ConfigError,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("provider '{name}' is not registered"))]
    ProviderNotRegistered {
        name: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to create model '{model}' for provider '{provider}'"))]
    ModelCreation {
        provider: String,
        model: String,
        source: HyperError,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for ModelResolveError {
    fn status_code(&self) -> StatusCode {
        match self {
            ModelResolveError::Config { .. } => StatusCode::InvalidArguments,
            ModelResolveError::ProviderNotRegistered { .. } => StatusCode::InvalidArguments,
            ModelResolveError::ModelCreation { .. } => StatusCode::External,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Resolves [`ModelSpec`]s against a [`ConfigManager`] (for connection info
/// and model aliasing) and a [`ProviderRegistry`] (for the live provider
/// implementations).
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    config: Arc<ConfigManager>,
    providers: Arc<ProviderRegistry>,
}

impl ModelRegistry {
    pub fn new(config: Arc<ConfigManager>, providers: Arc<ProviderRegistry>) -> Self {
        Self { config, providers }
    }

    /// Resolve a [`ModelSpec`] into a live model handle.
    ///
    /// Looks up the provider's connection info via `ConfigManager` (to
    /// resolve any model alias), then asks the matching registered
    /// [`Provider`] for the model by its API name.
    pub fn resolve(&self, spec: &ModelSpec) -> Result<Arc<dyn Model>, ModelResolveError> {
        let provider_info = self
            .config
            .resolve_provider(&spec.provider)
            .context(model_resolve_error::ConfigSnafu {
                provider: spec.provider.clone(),
            })?;

        let provider = self.providers.get(&provider_info.name).context(
            model_resolve_error::ProviderNotRegisteredSnafu {
                name: provider_info.name.clone(),
            },
        )?;

        let api_model_name = provider_info
            .api_model_name(&spec.model)
            .unwrap_or(&spec.model);

        provider
            .model(api_model_name)
            .context(model_resolve_error::ModelCreationSnafu {
                provider: spec.provider.clone(),
                model: spec.model.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnkit_protocol::ProviderType;

    #[test]
    fn resolve_error_display_names_provider() {
        let err = model_resolve_error::ProviderNotRegisteredSnafu {
            name: "anthropic".to_string(),
        }
        .build();
        assert!(err.to_string().contains("anthropic"));
    }

    #[test]
    fn model_spec_carries_provider_and_model() {
        let spec = ModelSpec::with_type("anthropic", ProviderType::Anthropic, "claude-opus-4");
        assert_eq!(spec.provider, "anthropic");
        assert_eq!(spec.model, "claude-opus-4");
    }
}
