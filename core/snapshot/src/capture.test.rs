use super::*;
use tempfile::tempdir;

#[tokio::test]
async fn captures_small_text_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.txt");
    tokio::fs::write(&path, b"hello").await.unwrap();

    let state = capture_file_state(&path, DEFAULT_MAX_CAPTURE_BYTES)
        .await
        .unwrap();
    assert_eq!(state.bytes(), Some(&b"hello"[..]));
}

#[tokio::test]
async fn omits_absent_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.txt");

    let state = capture_file_state(&path, DEFAULT_MAX_CAPTURE_BYTES)
        .await
        .unwrap();
    assert!(matches!(state, FileState::Omitted(OmittedReason::Absent)));
}

#[tokio::test]
async fn omits_file_over_size_threshold() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("big.txt");
    tokio::fs::write(&path, vec![b'x'; 128]).await.unwrap();

    let state = capture_file_state(&path, 16).await.unwrap();
    assert!(matches!(
        state,
        FileState::Omitted(OmittedReason::TooLarge { size: 128, limit: 16 })
    ));
}

#[tokio::test]
async fn omits_binary_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bin.dat");
    tokio::fs::write(&path, [0u8, 1, 2, 3]).await.unwrap();

    let state = capture_file_state(&path, DEFAULT_MAX_CAPTURE_BYTES)
        .await
        .unwrap();
    assert!(matches!(state, FileState::Omitted(OmittedReason::Binary)));
}

#[tokio::test]
async fn restore_then_remove_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/a.txt");

    restore_file(&path, b"content").await.unwrap();
    assert_eq!(tokio::fs::read(&path).await.unwrap(), b"content");

    remove_file(&path).await.unwrap();
    assert!(!path.exists());

    // Removing an already-missing file is not an error.
    remove_file(&path).await.unwrap();
}
