//! Error types for the background job table.

use turnkit_error::ErrorExt;
use turnkit_error::Location;
use turnkit_error::StatusCode;
use turnkit_error::stack_trace_debug;
use snafu::Snafu;

/// Background job table errors.
#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum BackgroundError {
    /// Spawning the detached process failed.
    #[snafu(display("Failed to spawn background job: {message}"))]
    Spawn {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// No job is registered under the given task id.
    #[snafu(display("No background job found with id: {task_id}"))]
    NotFound {
        task_id: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// An I/O error occurred while reading or killing a job's process.
    #[snafu(display("Background job I/O error: {message}"))]
    Io {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for BackgroundError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Spawn { .. } => StatusCode::Internal,
            Self::NotFound { .. } => StatusCode::InvalidArguments,
            Self::Io { .. } => StatusCode::IoError,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Result type for background job table operations.
pub type Result<T> = std::result::Result<T, BackgroundError>;

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
