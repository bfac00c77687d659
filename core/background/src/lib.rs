//! Background job table (C9): deduplicates long-running shell jobs keyed by
//! `(workdir, command)` and applies TTL-based auto-termination.
//!
//! Jobs run detached in their own process group so a later terminate takes
//! down anything the command itself spawned, not just the immediate shell.

pub mod error;
pub mod job;
pub mod process;
pub mod registry;
pub mod ring_buffer;

pub use error::BackgroundError;
pub use error::Result;
pub use job::BackgroundJobConfig;
pub use registry::BackgroundJobTable;
pub use registry::BackgroundStartOutcome;
