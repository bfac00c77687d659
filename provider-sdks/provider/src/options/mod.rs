//! Provider-specific options.
//!
//! This module provides type-erased provider options through the
//! [`ProviderOptionsData`] trait so `GenerateRequest` and `Message` can carry
//! provider-specific tuning knobs without this crate knowing about every
//! provider that exists.

use serde::Deserialize;
use serde::Serialize;
use std::any::Any;
use std::fmt::Debug;

/// Marker trait for provider-specific options.
///
/// This trait associates options with their target provider name,
/// enabling runtime validation when options are passed to models.
pub trait ProviderMarker {
    /// The canonical provider name (e.g., "openai", "anthropic", "gemini").
    const PROVIDER_NAME: &'static str;
}

/// Combined trait for typed, provider-aware options.
///
/// Options implementing this trait can be validated at runtime
/// to ensure they're used with the correct provider.
pub trait TypedProviderOptions: ProviderOptionsData + ProviderMarker {}

/// Trait for type-erased provider options.
///
/// This allows storing provider-specific options in a generic way
/// while still being able to downcast to the concrete type when needed.
pub trait ProviderOptionsData: Send + Sync + Debug + Any {
    /// Get a reference to the underlying Any type for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Clone the options into a box.
    fn clone_box(&self) -> Box<dyn ProviderOptionsData>;

    /// Get the provider name if this type implements ProviderMarker.
    ///
    /// Returns `None` for options that don't implement ProviderMarker.
    fn provider_name(&self) -> Option<&'static str> {
        None
    }
}

/// Type-erased provider options.
pub type ProviderOptions = Box<dyn ProviderOptionsData>;

impl Clone for Box<dyn ProviderOptionsData> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// Implement Serialize/Deserialize for ProviderOptions by serializing as empty object
impl Serialize for Box<dyn ProviderOptionsData> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Provider options are not serialized in the wire format
        serializer.serialize_none()
    }
}

impl<'de> Deserialize<'de> for Box<dyn ProviderOptionsData> {
    fn deserialize<D>(_deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Cannot deserialize type-erased options
        Err(serde::de::Error::custom(
            "cannot deserialize provider options directly",
        ))
    }
}

/// Helper to downcast provider options to a specific type.
pub fn downcast_options<T: ProviderOptionsData + 'static>(options: &ProviderOptions) -> Option<&T> {
    options.as_any().downcast_ref::<T>()
}

use crate::error::HyperError;

/// Downcast provider options with explicit error on type mismatch.
///
/// Unlike `downcast_options()` which returns `Option`, this function
/// returns a `Result` with a descriptive error message on failure.
pub fn try_downcast_options<T: ProviderOptionsData + 'static>(
    options: &ProviderOptions,
) -> Result<&T, HyperError> {
    options.as_any().downcast_ref::<T>().ok_or_else(|| {
        HyperError::ConfigError(format!(
            "Provider options type mismatch: expected {}, got different type",
            std::any::type_name::<T>()
        ))
    })
}

#[cfg(test)]
#[path = "mod.test.rs"]
mod tests;
