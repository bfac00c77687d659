//! Process-group spawn and termination helpers.
//!
//! Background jobs run detached from the caller's process group so that a
//! SIGTERM/SIGKILL sent to the group takes any children the command itself
//! spawned down with it, not just the immediate shell.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

/// Spawns `command` under `/bin/sh -c` in its own process group (Unix) so
/// the whole tree can be terminated by PID later.
pub fn spawn_detached(command: &str, workdir: &Path) -> std::io::Result<tokio::process::Child> {
    let mut cmd = Command::new("/bin/sh");
    cmd.arg("-c")
        .arg(command)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(false);

    // Detach into a new session/process group so the whole tree can be
    // terminated by process-group signal later.
    #[cfg(unix)]
    unsafe {
        cmd.pre_exec(|| {
            let _ = libc::setsid();
            Ok(())
        });
    }

    cmd.spawn()
}

/// Sends SIGTERM to the job's process group, waits `grace_ms`, then SIGKILL
/// if the group is still alive. No-op on platforms without process groups
/// beyond a best-effort direct kill of the leader pid.
pub async fn terminate_process_group(pid: u32, grace_ms: u64) {
    #[cfg(unix)]
    {
        // Negative pid targets the whole process group created by setsid().
        let pgid = -(pid as i32);
        unsafe {
            libc::kill(pgid, libc::SIGTERM);
        }
        tokio::time::sleep(std::time::Duration::from_millis(grace_ms)).await;
        if process_alive(pid) {
            unsafe {
                libc::kill(pgid, libc::SIGKILL);
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = grace_ms;
        let _ = pid;
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    // Signal 0 performs error checking without sending a signal.
    unsafe { libc::kill(pid as i32, 0) == 0 }
}

#[cfg(test)]
#[path = "process.test.rs"]
mod tests;
