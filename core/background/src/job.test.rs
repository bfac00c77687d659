use super::*;
use std::path::PathBuf;

fn spawn_sleep(secs: u64) -> tokio::process::Child {
    tokio::process::Command::new("sleep")
        .arg(secs.to_string())
        .kill_on_drop(true)
        .spawn()
        .expect("spawn sleep")
}

fn spawn_true() -> tokio::process::Child {
    tokio::process::Command::new("true")
        .kill_on_drop(true)
        .spawn()
        .expect("spawn true")
}

#[tokio::test]
async fn test_poll_alive_true_while_running() {
    let child = spawn_sleep(5);
    let pid = child.id().unwrap_or(0);
    let job = JobState::new(
        "bg-1".to_string(),
        "key-1".to_string(),
        "sleep 5".to_string(),
        PathBuf::from("/tmp"),
        pid,
        child,
        &BackgroundJobConfig::default(),
    );
    assert!(job.poll_alive().await);
}

#[tokio::test]
async fn test_poll_alive_false_after_exit() {
    let child = spawn_true();
    let pid = child.id().unwrap_or(0);
    let job = JobState::new(
        "bg-2".to_string(),
        "key-2".to_string(),
        "true".to_string(),
        PathBuf::from("/tmp"),
        pid,
        child,
        &BackgroundJobConfig::default(),
    );
    // Give the child a moment to exit.
    for _ in 0..50 {
        if !job.poll_alive().await {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert!(!job.poll_alive().await);
    assert_eq!(*job.exit_code.lock().await, Some(0));
}

#[tokio::test]
async fn test_touch_updates_last_touch() {
    let child = spawn_true();
    let pid = child.id().unwrap_or(0);
    let job = JobState::new(
        "bg-3".to_string(),
        "key-3".to_string(),
        "true".to_string(),
        PathBuf::from("/tmp"),
        pid,
        child,
        &BackgroundJobConfig::default(),
    );
    let before = *job.last_touch.lock().await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    job.touch().await;
    let after = *job.last_touch.lock().await;
    assert!(after > before);
}
