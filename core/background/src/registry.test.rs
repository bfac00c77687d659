use super::*;
use std::path::Path;
use turnkit_error::ErrorExt;

fn fast_ttl_config(ttl_ms: u64) -> BackgroundJobConfig {
    BackgroundJobConfig {
        ttl_ms,
        kill_grace_period_ms: 50,
        capture_lines: 100,
        capture_line_bytes: 1024,
    }
}

#[tokio::test]
async fn test_start_captures_output() {
    let table = BackgroundJobTable::new(fast_ttl_config(60_000));
    let outcome = table
        .start(Path::new("/tmp"), "echo hello-background")
        .await
        .expect("start");
    assert!(!outcome.reused);

    let mut output = String::new();
    for _ in 0..50 {
        output = table.output(&outcome.task_id).await.expect("output");
        if output.contains("hello-background") {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert!(output.contains("hello-background"));
}

#[tokio::test]
async fn test_dedupe_reuses_live_job() {
    let table = BackgroundJobTable::new(fast_ttl_config(60_000));
    let first = table
        .start(Path::new("/tmp"), "sleep 2")
        .await
        .expect("start first");
    assert!(!first.reused);

    let second = table
        .start(Path::new("/tmp"), "sleep 2")
        .await
        .expect("start second");
    assert!(second.reused);
    assert_eq!(first.task_id, second.task_id);
    assert_eq!(first.pid, second.pid);

    table.kill(&first.task_id).await.expect("kill");
}

#[tokio::test]
async fn test_different_workdir_does_not_dedupe() {
    let table = BackgroundJobTable::new(fast_ttl_config(60_000));
    let first = table
        .start(Path::new("/tmp"), "sleep 2")
        .await
        .expect("start first");
    let second = table
        .start(Path::new("/"), "sleep 2")
        .await
        .expect("start second");
    assert!(!second.reused);
    assert_ne!(first.task_id, second.task_id);

    table.kill(&first.task_id).await.expect("kill first");
    table.kill(&second.task_id).await.expect("kill second");
}

#[tokio::test]
async fn test_kill_stops_running_job() {
    let table = BackgroundJobTable::new(fast_ttl_config(60_000));
    let outcome = table
        .start(Path::new("/tmp"), "sleep 30")
        .await
        .expect("start");
    assert!(table.is_running(&outcome.task_id).await);

    table.kill(&outcome.task_id).await.expect("kill");

    let mut still_running = true;
    for _ in 0..50 {
        still_running = table.is_running(&outcome.task_id).await;
        if !still_running {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert!(!still_running);
}

#[tokio::test]
async fn test_output_on_unknown_task_errors() {
    let table = BackgroundJobTable::new(fast_ttl_config(60_000));
    let err = table.output("bg-does-not-exist").await.unwrap_err();
    assert_eq!(err.status_code(), turnkit_error::StatusCode::InvalidArguments);
}

#[tokio::test]
async fn test_ttl_expiry_terminates_idle_job() {
    let table = BackgroundJobTable::new(fast_ttl_config(80));
    let outcome = table
        .start(Path::new("/tmp"), "sleep 30")
        .await
        .expect("start");

    let mut still_running = true;
    for _ in 0..100 {
        still_running = table.is_running(&outcome.task_id).await;
        if !still_running {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert!(!still_running);
}

#[tokio::test]
async fn test_start_after_job_exits_spawns_fresh() {
    let table = BackgroundJobTable::new(fast_ttl_config(60_000));
    let first = table
        .start(Path::new("/tmp"), "true")
        .await
        .expect("start first");

    // Let the short-lived command finish.
    for _ in 0..50 {
        if !table.is_running(&first.task_id).await {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    let second = table
        .start(Path::new("/tmp"), "true")
        .await
        .expect("start second");
    assert!(!second.reused);
    assert_ne!(first.task_id, second.task_id);
}
