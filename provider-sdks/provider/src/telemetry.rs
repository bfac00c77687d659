//! Observer hooks for request/retry/stream lifecycle events.
//!
//! The engine does not require telemetry to function; [`NoopTelemetry`] is
//! the default. [`LoggingTelemetry`] routes the same events through
//! `tracing`, matching the ambient logging discipline used everywhere else
//! in the workspace (debug for routine transitions, warn for degraded-but-
//! recovered conditions).

use crate::error::HyperError;
use http::StatusCode;
use std::fmt::Debug;
use std::time::Duration;

/// Observes retry/stream lifecycle events. Implementations must be cheap:
/// these hooks are called on every attempt.
pub trait RequestTelemetry: Debug + Send + Sync {
    fn on_request(
        &self,
        attempt: i32,
        status: Option<StatusCode>,
        error: Option<&HyperError>,
        duration: Duration,
    );

    fn on_retry(&self, attempt: i32, delay: Duration);

    fn on_exhausted(&self, total_attempts: i32, final_error: &HyperError);

    fn on_stream_poll(&self, event_kind: Option<&str>, duration: Duration);

    fn on_stream_complete(&self, event_count: u64, duration: Duration);

    fn on_stream_error(&self, error: &HyperError);

    fn on_idle_timeout(&self, idle_for: Duration);
}

/// Telemetry implementation that does nothing.
#[derive(Debug, Default)]
pub struct NoopTelemetry;

impl RequestTelemetry for NoopTelemetry {
    fn on_request(&self, _: i32, _: Option<StatusCode>, _: Option<&HyperError>, _: Duration) {}
    fn on_retry(&self, _: i32, _: Duration) {}
    fn on_exhausted(&self, _: i32, _: &HyperError) {}
    fn on_stream_poll(&self, _: Option<&str>, _: Duration) {}
    fn on_stream_complete(&self, _: u64, _: Duration) {}
    fn on_stream_error(&self, _: &HyperError) {}
    fn on_idle_timeout(&self, _: Duration) {}
}

/// Telemetry implementation that logs through `tracing`.
#[derive(Debug, Default)]
pub struct LoggingTelemetry;

impl RequestTelemetry for LoggingTelemetry {
    fn on_request(
        &self,
        attempt: i32,
        status: Option<StatusCode>,
        error: Option<&HyperError>,
        duration: Duration,
    ) {
        match error {
            Some(err) => {
                tracing::debug!(attempt, ?duration, %err, "provider request failed")
            }
            None => {
                tracing::debug!(attempt, ?status, ?duration, "provider request succeeded")
            }
        }
    }

    fn on_retry(&self, attempt: i32, delay: Duration) {
        tracing::debug!(attempt, ?delay, "retrying provider request");
    }

    fn on_exhausted(&self, total_attempts: i32, final_error: &HyperError) {
        tracing::warn!(total_attempts, %final_error, "provider retries exhausted");
    }

    fn on_stream_poll(&self, event_kind: Option<&str>, duration: Duration) {
        tracing::debug!(event_kind, ?duration, "stream event");
    }

    fn on_stream_complete(&self, event_count: u64, duration: Duration) {
        tracing::debug!(event_count, ?duration, "stream complete");
    }

    fn on_stream_error(&self, error: &HyperError) {
        tracing::warn!(%error, "stream error");
    }

    fn on_idle_timeout(&self, idle_for: Duration) {
        tracing::warn!(?idle_for, "stream idle timeout");
    }
}

#[cfg(test)]
#[path = "telemetry.test.rs"]
mod tests;
