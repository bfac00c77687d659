//! A single tracked background job and its configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::ring_buffer::OutputRingBuffer;

/// Tuning knobs for the background job table, mirroring the engine's
/// `tools.bash.background*` settings.
#[derive(Debug, Clone, Copy)]
pub struct BackgroundJobConfig {
    /// Idle time after which a job is sent SIGTERM (then SIGKILL after the
    /// grace period) if not refreshed by a dedup hit.
    pub ttl_ms: u64,
    /// Grace period between SIGTERM and SIGKILL when a job is terminated.
    pub kill_grace_period_ms: u64,
    /// Maximum number of output lines retained per job.
    pub capture_lines: usize,
    /// Maximum bytes retained per output line.
    pub capture_line_bytes: usize,
}

impl Default for BackgroundJobConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 10 * 60 * 1000,
            kill_grace_period_ms: 2_000,
            capture_lines: 1_000,
            capture_line_bytes: 4_096,
        }
    }
}

/// State tracked for one spawned background job.
pub struct JobState {
    pub task_id: String,
    pub dedupe_key: String,
    pub command: String,
    pub workdir: PathBuf,
    pub pid: u32,
    pub started_at: Instant,
    pub last_touch: Mutex<Instant>,
    pub output: Arc<Mutex<OutputRingBuffer>>,
    pub child: Mutex<Option<tokio::process::Child>>,
    pub exit_code: Mutex<Option<i32>>,
}

impl JobState {
    pub fn new(
        task_id: String,
        dedupe_key: String,
        command: String,
        workdir: PathBuf,
        pid: u32,
        child: tokio::process::Child,
        config: &BackgroundJobConfig,
    ) -> Self {
        let now = Instant::now();
        Self {
            task_id,
            dedupe_key,
            command,
            workdir,
            pid,
            started_at: now,
            last_touch: Mutex::new(now),
            output: Arc::new(Mutex::new(OutputRingBuffer::new(
                config.capture_lines,
                config.capture_line_bytes,
            ))),
            child: Mutex::new(Some(child)),
            exit_code: Mutex::new(None),
        }
    }

    /// Checks whether the child process has exited, recording its exit code
    /// the first time this observes completion. Returns `true` if still
    /// running.
    pub async fn poll_alive(&self) -> bool {
        let mut guard = self.child.lock().await;
        let Some(child) = guard.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(Some(status)) => {
                *self.exit_code.lock().await = Some(status.code().unwrap_or(-1));
                *guard = None;
                false
            }
            Ok(None) => true,
            Err(_) => {
                *guard = None;
                false
            }
        }
    }

    pub async fn touch(&self) {
        *self.last_touch.lock().await = Instant::now();
    }
}

#[cfg(test)]
#[path = "job.test.rs"]
mod tests;
