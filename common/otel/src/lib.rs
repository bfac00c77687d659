//! Tracing-based logging initialization for the turn engine.
//!
//! This crate owns exactly one concern: installing the global
//! `tracing_subscriber` layer with the right filter, target formatting, and
//! timestamp timezone for a given [`turnkit_config::LoggingConfig`]. It does
//! not export metrics or traces anywhere; there is no OTLP exporter here.

mod error;
mod init;
mod timer;

pub use error::OtelError;
pub use init::LogTarget;
pub use init::LoggingGuard;
pub use init::init_logging;
pub use timer::ConfigurableTimer;
pub use timer::Timezone;
