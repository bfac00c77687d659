//! Process-wide background job table (C9): dedupes concurrent background
//! shell invocations by `(workdir, command)`, tracks their combined output,
//! and auto-terminates idle jobs once their TTL elapses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use sha2::Digest;
use tokio::io::AsyncRead;
use tokio::io::AsyncReadExt;
use tokio::sync::Mutex;
use tracing::debug;
use tracing::warn;

use crate::error::Result;
use crate::error::background_error::NotFoundSnafu;
use crate::error::background_error::SpawnSnafu;
use crate::job::BackgroundJobConfig;
use crate::job::JobState;
use crate::process;
use crate::ring_buffer::OutputRingBuffer;

/// Outcome of a `start` call: either a freshly spawned job or a hit against
/// an already-running job keyed by the same `(workdir, command)` pair.
#[derive(Debug, Clone)]
pub struct BackgroundStartOutcome {
    pub task_id: String,
    pub pid: u32,
    pub reused: bool,
}

/// Process-wide table of background jobs.
#[derive(Clone)]
pub struct BackgroundJobTable {
    jobs: Arc<Mutex<HashMap<String, Arc<JobState>>>>,
    live_keys: Arc<Mutex<HashMap<String, String>>>,
    config: BackgroundJobConfig,
}

impl BackgroundJobTable {
    pub fn new(config: BackgroundJobConfig) -> Self {
        Self {
            jobs: Arc::new(Mutex::new(HashMap::new())),
            live_keys: Arc::new(Mutex::new(HashMap::new())),
            config,
        }
    }

    /// Starts a background command, or reuses a live job already running
    /// the same `(workdir, command)` pair, refreshing its TTL.
    pub async fn start(&self, workdir: &Path, command: &str) -> Result<BackgroundStartOutcome> {
        self.sweep_dead().await;

        let key = dedupe_key(workdir, command);
        if let Some(task_id) = self.live_keys.lock().await.get(&key).cloned() {
            let existing = self.jobs.lock().await.get(&task_id).cloned();
            if let Some(job) = existing {
                if job.poll_alive().await {
                    job.touch().await;
                    debug!(task_id = %job.task_id, pid = job.pid, "Reusing live background job");
                    return Ok(BackgroundStartOutcome {
                        task_id: job.task_id.clone(),
                        pid: job.pid,
                        reused: true,
                    });
                }
            }
        }

        let mut child = process::spawn_detached(command, workdir)
            .map_err(|e| SpawnSnafu { message: e.to_string() }.build())?;
        let pid = child
            .id()
            .ok_or_else(|| SpawnSnafu { message: "spawned child has no pid".to_string() }.build())?;
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let task_id = format!("bg-{}", uuid::Uuid::new_v4());
        let job = Arc::new(JobState::new(
            task_id.clone(),
            key.clone(),
            command.to_string(),
            workdir.to_path_buf(),
            pid,
            child,
            &self.config,
        ));

        if let Some(stdout) = stdout {
            spawn_reader(stdout, job.output.clone());
        }
        if let Some(stderr) = stderr {
            spawn_reader(stderr, job.output.clone());
        }

        self.jobs.lock().await.insert(task_id.clone(), job.clone());
        self.live_keys.lock().await.insert(key.clone(), task_id.clone());
        self.spawn_ttl_watcher(job, key);

        Ok(BackgroundStartOutcome { task_id, pid, reused: false })
    }

    /// Returns the captured combined stdout+stderr for a job, most recent
    /// lines last.
    pub async fn output(&self, task_id: &str) -> Result<String> {
        let job = self.job_or_not_found(task_id).await?;
        Ok(job.output.lock().await.render())
    }

    /// True if the job is registered and its process has not exited.
    pub async fn is_running(&self, task_id: &str) -> bool {
        match self.jobs.lock().await.get(task_id).cloned() {
            Some(job) => job.poll_alive().await,
            None => false,
        }
    }

    /// Explicitly terminates a job's process group and drops its dedupe
    /// entry so a subsequent identical command spawns fresh.
    pub async fn kill(&self, task_id: &str) -> Result<()> {
        let job = self.job_or_not_found(task_id).await?;
        if job.poll_alive().await {
            process::terminate_process_group(job.pid, self.config.kill_grace_period_ms).await;
        }
        self.unlink_live_key(&job).await;
        Ok(())
    }

    async fn job_or_not_found(&self, task_id: &str) -> Result<Arc<JobState>> {
        self.jobs
            .lock()
            .await
            .get(task_id)
            .cloned()
            .ok_or_else(|| NotFoundSnafu { task_id: task_id.to_string() }.build())
    }

    async fn unlink_live_key(&self, job: &JobState) {
        let mut live = self.live_keys.lock().await;
        if live.get(&job.dedupe_key).map(String::as_str) == Some(job.task_id.as_str()) {
            live.remove(&job.dedupe_key);
        }
    }

    /// Removes dead jobs from the dedupe map so they no longer shadow a
    /// fresh start of the same `(workdir, command)` pair.
    async fn sweep_dead(&self) {
        let entries: Vec<Arc<JobState>> = self.jobs.lock().await.values().cloned().collect();
        for job in entries {
            if !job.poll_alive().await {
                self.unlink_live_key(&job).await;
            }
        }
    }

    fn spawn_ttl_watcher(&self, job: Arc<JobState>, key: String) {
        let ttl = Duration::from_millis(self.config.ttl_ms);
        let grace_ms = self.config.kill_grace_period_ms;
        let live_keys = self.live_keys.clone();
        tokio::spawn(async move {
            loop {
                let last_touch = *job.last_touch.lock().await;
                let deadline = last_touch + ttl;
                let now = Instant::now();
                if now < deadline {
                    tokio::time::sleep(deadline - now).await;
                }
                if !job.poll_alive().await {
                    break;
                }
                if Instant::now() < *job.last_touch.lock().await + ttl {
                    // Touched again while we were sleeping; recheck deadline.
                    continue;
                }
                warn!(task_id = %job.task_id, pid = job.pid, "Background job TTL expired, terminating");
                process::terminate_process_group(job.pid, grace_ms).await;
                break;
            }
            let mut live = live_keys.lock().await;
            if live.get(&key).map(String::as_str) == Some(job.task_id.as_str()) {
                live.remove(&key);
            }
        });
    }
}

fn spawn_reader<R>(mut reader: R, output: Arc<Mutex<OutputRingBuffer>>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = [0u8; 4096];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    let chunk = String::from_utf8_lossy(&buf[..n]);
                    output.lock().await.push(&chunk);
                }
            }
        }
    });
}

fn dedupe_key(workdir: &Path, command: &str) -> String {
    let mut hasher = sha2::Sha256::new();
    hasher.update(workdir.to_string_lossy().as_bytes());
    hasher.update([0u8]);
    hasher.update(command.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
#[path = "registry.test.rs"]
mod tests;
