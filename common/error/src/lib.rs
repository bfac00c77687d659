//! Shared error taxonomy for the turn engine.
//!
//! Every error type defined anywhere in the workspace maps into the single
//! [`StatusCode`] enum so that retry classification and log-worthiness are
//! decided in one place instead of being re-derived per crate.

mod ext;
mod status_code;

pub use ext::ErrorExt;
pub use ext::PlainError;
pub use ext::boxed;
pub use snafu::Location;
pub use status_code::StatusCategory;
pub use status_code::StatusCode;
pub use status_code::StatusMeta;
pub use turnkit_stack_trace_macro::stack_trace_debug;
