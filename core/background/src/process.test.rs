use super::*;
use std::path::Path;

#[tokio::test]
async fn test_spawn_detached_runs_command() {
    let mut child = spawn_detached("echo hello", Path::new("/tmp")).expect("spawn");
    let status = child.wait().await.expect("wait");
    assert!(status.success());
}

#[cfg(unix)]
#[tokio::test]
async fn test_terminate_process_group_kills_sleep() {
    let mut child = spawn_detached("sleep 30", Path::new("/tmp")).expect("spawn");
    let pid = child.id().expect("pid");

    terminate_process_group(pid, 50).await;

    // Give the kernel a moment to deliver the signal, then confirm exit.
    let status = tokio::time::timeout(std::time::Duration::from_secs(2), child.wait())
        .await
        .expect("did not exit after termination")
        .expect("wait");
    assert!(!status.success());
}
