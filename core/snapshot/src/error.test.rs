use super::snapshot_error::*;
use super::*;

#[test]
fn unknown_boundary_status_code() {
    let err: SnapshotError = UnknownBoundarySnafu { turn_number: 5 }.build();
    assert!(err.to_string().contains('5'));
    assert_eq!(err.status_code(), StatusCode::InvalidArguments);
}
