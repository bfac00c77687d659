//! Timestamp formatting for log lines.

use std::fmt;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

/// Which timezone log timestamps are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timezone {
    #[default]
    Local,
    Utc,
}

impl Timezone {
    /// Parse a `LoggingConfig::timezone` string, defaulting to local time.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("utc") => Self::Utc,
            _ => Self::Local,
        }
    }
}

/// A timer that formats timestamps in either local or UTC time, selected at
/// runtime so both branches can share one `FormatTime` impl.
#[derive(Debug, Clone)]
pub struct ConfigurableTimer {
    timezone: Timezone,
}

impl ConfigurableTimer {
    pub fn new(timezone: Timezone) -> Self {
        Self { timezone }
    }
}

impl FormatTime for ConfigurableTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        match self.timezone {
            Timezone::Local => {
                let now = chrono::Local::now();
                write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S%.3f"))
            }
            Timezone::Utc => {
                let now = chrono::Utc::now();
                write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S%.3fZ"))
            }
        }
    }
}

#[cfg(test)]
#[path = "timer.test.rs"]
mod tests;
