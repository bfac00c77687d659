//! Error types for configuration management.

use snafu::Location;
use snafu::Snafu;
use turnkit_error::ErrorExt;
use turnkit_error::StatusCode;
use turnkit_error::stack_trace_debug;

/// What kind of thing went unfound, for [`config_error::ConfigError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    Provider,
    Model,
    Profile,
}

impl std::fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider => write!(f, "provider"),
            Self::Model => write!(f, "model"),
            Self::Profile => write!(f, "profile"),
        }
    }
}

pub use config_error::ConfigError;

#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum config_error {
    #[snafu(display("home directory not found"))]
    HomeDirNotFound {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("{kind} not found: {name}"))]
    NotFound {
        kind: NotFoundKind,
        name: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("authentication failed: {message}"))]
    Auth {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("invalid config in {file}: {message}"))]
    ConfigValidation {
        file: String,
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("internal error: {message}"))]
    Internal {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("io error: {message}"))]
    Io {
        message: String,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("invalid json in {file}"))]
    JsonParse {
        file: String,
        source: serde_json::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("invalid jsonc in {file}: {message}"))]
    JsoncParse {
        file: String,
        message: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for ConfigError {
    fn status_code(&self) -> StatusCode {
        match self {
            ConfigError::HomeDirNotFound { .. } => StatusCode::FileNotFound,
            ConfigError::NotFound { kind, .. } => match kind {
                NotFoundKind::Provider => StatusCode::ProviderNotFound,
                NotFoundKind::Model => StatusCode::ModelNotFound,
                NotFoundKind::Profile => StatusCode::InvalidConfig,
            },
            ConfigError::Auth { .. } => StatusCode::AuthenticationFailed,
            ConfigError::ConfigValidation { .. } => StatusCode::InvalidConfig,
            ConfigError::Internal { .. } => StatusCode::Internal,
            ConfigError::Io { .. } => StatusCode::IoError,
            ConfigError::JsonParse { .. } => StatusCode::InvalidJson,
            ConfigError::JsoncParse { .. } => StatusCode::InvalidJson,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
