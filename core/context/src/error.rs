//! Error types for context assembly and budget computation.

use snafu::Location;
use snafu::Snafu;
use turnkit_error::ErrorExt;
use turnkit_error::StatusCode;
use turnkit_error::stack_trace_debug;

pub use context_error::ContextError;

#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum context_error {
    #[snafu(display("token budget exceeded: {message}"))]
    BudgetExceeded {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("invalid context config: {message}"))]
    InvalidConfig {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to build context: {message}"))]
    Build {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for ContextError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContextError::BudgetExceeded { .. } => StatusCode::InvalidArguments,
            ContextError::InvalidConfig { .. } => StatusCode::InvalidConfig,
            ContextError::Build { .. } => StatusCode::Internal,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Result type alias for context operations.
pub type Result<T> = std::result::Result<T, ContextError>;

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
