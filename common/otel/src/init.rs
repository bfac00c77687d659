//! Tracing subscriber setup.
//!
//! Logging destination is determined by the runtime mode, not by this crate:
//! TUI mode logs to a file under `~/.turnkit/log`, REPL mode logs to stderr.
//! Callers pick the [`LogTarget`]; this module just wires up the
//! `tracing_subscriber` layer on top of it.

use crate::error::Result;
use crate::error::otel_error::LogFileOpenSnafu;
use crate::error::otel_error::SubscriberInitSnafu;
use crate::timer::ConfigurableTimer;
use crate::timer::Timezone;
use std::fs::OpenOptions;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use turnkit_config::LoggingConfig;

/// Where log output is written.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    /// Write to stderr (REPL mode).
    Stderr,
    /// Write to a log file, created (and its parent directories) if needed.
    File(&'a Path),
}

/// Keeps the non-blocking writer's background flush thread alive. Hold this
/// for the lifetime of `main`; dropping it early truncates buffered log
/// lines.
pub struct LoggingGuard(#[allow(dead_code)] Option<WorkerGuard>);

/// Install the global tracing subscriber for the process.
///
/// Fails if a subscriber has already been installed, or if the log file
/// cannot be opened.
pub fn init_logging(config: &LoggingConfig, target: LogTarget<'_>) -> Result<LoggingGuard> {
    let env_filter =
        EnvFilter::try_new(config.filter_directive()).unwrap_or_else(|_| EnvFilter::new("info"));
    let timer = ConfigurableTimer::new(Timezone::parse(config.timezone.as_deref()));
    let with_target = config.target.unwrap_or(false);
    let with_location = config.location.unwrap_or(false);

    let (guard, init_result) = match target {
        LogTarget::Stderr => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(with_target)
                .with_file(with_location)
                .with_line_number(with_location)
                .with_timer(timer)
                .with_filter(env_filter);
            (None, tracing_subscriber::registry().with(layer).try_init())
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            let mut opts = OpenOptions::new();
            opts.create(true).append(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt;
                opts.mode(0o600);
            }
            let file = opts.open(path).map_err(|e| {
                LogFileOpenSnafu {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
                .build()
            })?;

            let (non_blocking_writer, worker_guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_writer)
                .with_target(with_target)
                .with_ansi(false)
                .with_file(with_location)
                .with_line_number(with_location)
                .with_timer(timer)
                .with_filter(env_filter);
            (
                Some(worker_guard),
                tracing_subscriber::registry().with(layer).try_init(),
            )
        }
    };

    init_result.map_err(|e| {
        SubscriberInitSnafu {
            message: e.to_string(),
        }
        .build()
    })?;

    Ok(LoggingGuard(guard))
}

#[cfg(test)]
#[path = "init.test.rs"]
mod tests;
