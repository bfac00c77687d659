use super::*;

#[test]
fn init_logging_file_target_opens_and_creates_parent_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let log_path = tmp.path().join("nested").join("turnkit.log");
    let config = LoggingConfig::default();

    let result = init_logging(&config, LogTarget::File(&log_path));
    assert!(result.is_ok());
    assert!(log_path.exists());
}

#[test]
fn init_logging_twice_in_same_process_errs_on_second_call() {
    let tmp = tempfile::tempdir().unwrap();
    let config = LoggingConfig::default();

    let first = init_logging(&config, LogTarget::File(&tmp.path().join("a.log")));
    let second = init_logging(&config, LogTarget::File(&tmp.path().join("b.log")));

    // Whichever of these two tests in the binary runs first wins the global
    // subscriber; both can't succeed, so at most one is Ok.
    assert!(!(first.is_ok() && second.is_ok()));
}
