//! Error types for logging initialization.

use snafu::Location;
use snafu::Snafu;
use turnkit_error::ErrorExt;
use turnkit_error::StatusCode;
use turnkit_error::stack_trace_debug;

pub use otel_error::OtelError;

#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum otel_error {
    #[snafu(display("failed to install global tracing subscriber: {message}"))]
    SubscriberInit {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to open log file {path}: {message}"))]
    LogFileOpen {
        path: String,
        message: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for OtelError {
    fn status_code(&self) -> StatusCode {
        match self {
            OtelError::SubscriberInit { .. } => StatusCode::Internal,
            OtelError::LogFileOpen { .. } => StatusCode::IoError,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Result type alias for logging initialization.
pub type Result<T> = std::result::Result<T, OtelError>;
