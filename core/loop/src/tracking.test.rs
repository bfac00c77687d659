use super::*;

#[test]
fn query_tracking_starts_at_depth_zero() {
    let tracking = QueryTracking::new_root("chain-1".to_string());
    assert_eq!(tracking.chain_id, "chain-1");
    assert_eq!(tracking.depth, 0);
}

#[test]
fn mark_compacted_records_turn() {
    let mut tracking = AutoCompactTracking::new();
    assert!(tracking.last_compacted_turn_id.is_none());

    tracking.mark_compacted("turn-5", 5);
    assert_eq!(tracking.last_compacted_turn_id.as_deref(), Some("turn-5"));
    assert_eq!(tracking.last_compacted_turn_number, Some(5));
}

#[test]
fn extraction_lifecycle() {
    let mut tracking = AutoCompactTracking::new();
    assert_eq!(tracking.extraction_count, 0);
    assert!(!tracking.extraction_in_progress);

    tracking.mark_extraction_started();
    assert!(tracking.extraction_in_progress);

    for _ in 0..5 {
        tracking.record_tool_call();
    }

    tracking.mark_extraction_completed(8000, "msg-9");
    assert!(!tracking.extraction_in_progress);
    assert_eq!(tracking.extraction_count, 1);
    assert_eq!(tracking.tokens_since_extraction(8000), 0);
    assert_eq!(tracking.tokens_since_extraction(9000), 1000);
    assert_eq!(tracking.tool_calls_since_extraction(), 0);

    tracking.record_tool_call();
    tracking.record_tool_call();
    assert_eq!(tracking.tool_calls_since_extraction(), 2);
    assert!(tracking.time_since_extraction() < std::time::Duration::from_secs(5));
}

#[test]
fn extraction_failure_clears_in_progress_without_advancing_count() {
    let mut tracking = AutoCompactTracking::new();
    tracking.mark_extraction_started();
    tracking.mark_extraction_failed();
    assert!(!tracking.extraction_in_progress);
    assert_eq!(tracking.extraction_count, 0);
}

#[test]
fn time_since_extraction_is_unbounded_before_first_extraction() {
    let tracking = AutoCompactTracking::new();
    assert_eq!(tracking.time_since_extraction(), std::time::Duration::MAX);
}
