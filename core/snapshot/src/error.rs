//! Error types for the snapshot/undo ledger.

use snafu::Location;
use snafu::Snafu;
use std::path::PathBuf;
use turnkit_error::ErrorExt;
use turnkit_error::StatusCode;
use turnkit_error::stack_trace_debug;

pub use snapshot_error::SnapshotError;

#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum snapshot_error {
    #[snafu(display("failed to read {path}: {source}"))]
    Read {
        path: PathBuf,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to write {path}: {source}"))]
    Write {
        path: PathBuf,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("no turn {turn_number} in the snapshot ledger"))]
    UnknownBoundary {
        turn_number: i32,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for SnapshotError {
    fn status_code(&self) -> StatusCode {
        match self {
            SnapshotError::Read { .. } => StatusCode::IoError,
            SnapshotError::Write { .. } => StatusCode::IoError,
            SnapshotError::UnknownBoundary { .. } => StatusCode::InvalidArguments,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Result type alias for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
