use super::*;
use tempfile::tempdir;

#[tokio::test]
async fn commit_records_before_and_after() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.txt");
    tokio::fs::write(&path, b"before").await.unwrap();

    let mut ledger = SnapshotLedger::new();
    let pending = ledger.begin_capture(&path).await.unwrap();

    tokio::fs::write(&path, b"after").await.unwrap();
    ledger.commit(pending, "turn-1", 1).await.unwrap();

    assert_eq!(ledger.len(), 1);
    let entry = &ledger.entries()[0];
    assert_eq!(entry.before.bytes(), Some(&b"before"[..]));
    assert_eq!(entry.after.bytes(), Some(&b"after"[..]));
}

#[tokio::test]
async fn discard_drops_pending_capture_silently() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.txt");
    tokio::fs::write(&path, b"before").await.unwrap();

    let ledger = SnapshotLedger::new();
    let pending = ledger.begin_capture(&path).await.unwrap();
    ledger.discard(pending);

    assert!(ledger.is_empty());
}

#[tokio::test]
async fn undo_reverts_entries_newer_than_boundary_in_reverse() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.txt");
    tokio::fs::write(&path, b"v0").await.unwrap();

    let mut ledger = SnapshotLedger::new();

    for (turn, content) in [(1, "v1"), (2, "v2"), (3, "v3")] {
        let pending = ledger.begin_capture(&path).await.unwrap();
        tokio::fs::write(&path, content).await.unwrap();
        ledger
            .commit(pending, format!("turn-{turn}"), turn)
            .await
            .unwrap();
    }

    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "v3");

    let outcomes = ledger.undo_to(1).await.unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "v1");
    assert_eq!(ledger.len(), 1);
}

#[tokio::test]
async fn redo_replays_after_bytes_in_chronological_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.txt");
    tokio::fs::write(&path, b"v0").await.unwrap();

    let mut ledger = SnapshotLedger::new();
    for (turn, content) in [(1, "v1"), (2, "v2")] {
        let pending = ledger.begin_capture(&path).await.unwrap();
        tokio::fs::write(&path, content).await.unwrap();
        ledger
            .commit(pending, format!("turn-{turn}"), turn)
            .await
            .unwrap();
    }

    ledger.undo_to(0).await.unwrap();
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "v0");

    ledger.redo().await.unwrap();
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "v2");
    assert_eq!(ledger.len(), 2);
}

#[tokio::test]
async fn undo_of_absent_before_state_removes_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("new.txt");

    let mut ledger = SnapshotLedger::new();
    let pending = ledger.begin_capture(&path).await.unwrap();
    tokio::fs::write(&path, b"created").await.unwrap();
    ledger.commit(pending, "turn-1", 1).await.unwrap();

    ledger.undo_to(0).await.unwrap();
    assert!(!path.exists());
}

#[tokio::test]
async fn undo_of_omitted_before_state_is_a_noop_with_warning() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("big.txt");
    tokio::fs::write(&path, vec![b'x'; 64]).await.unwrap();

    let mut ledger = SnapshotLedger::with_max_capture_bytes(8);
    let pending = ledger.begin_capture(&path).await.unwrap();
    tokio::fs::write(&path, vec![b'y'; 64]).await.unwrap();
    ledger.commit(pending, "turn-1", 1).await.unwrap();

    let outcomes = ledger.undo_to(0).await.unwrap();
    assert!(matches!(outcomes.as_slice(), [UndoOutcome::Noop { .. }]));
    // File is untouched since before-bytes were never captured.
    assert_eq!(
        tokio::fs::read(&path).await.unwrap(),
        vec![b'y'; 64]
    );
}

#[tokio::test]
async fn discard_past_drops_entries_without_touching_filesystem() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.txt");
    tokio::fs::write(&path, b"v0").await.unwrap();

    let mut ledger = SnapshotLedger::new();
    for (turn, content) in [(1, "v1"), (2, "v2")] {
        let pending = ledger.begin_capture(&path).await.unwrap();
        tokio::fs::write(&path, content).await.unwrap();
        ledger
            .commit(pending, format!("turn-{turn}"), turn)
            .await
            .unwrap();
    }

    ledger.discard_past(1);
    assert_eq!(ledger.len(), 1);
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "v2");
}

#[test]
fn entries_for_turn_filters_by_turn_id() {
    let ledger = SnapshotLedger::new();
    assert_eq!(ledger.entries_for_turn("turn-1").count(), 0);
}
