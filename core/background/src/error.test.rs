use super::background_error::*;
use super::*;

#[test]
fn test_spawn_error() {
    let err: BackgroundError = SpawnSnafu {
        message: "fork failed",
    }
    .build();
    assert_eq!(err.status_code(), StatusCode::Internal);
    assert!(err.to_string().contains("Failed to spawn background job"));
}

#[test]
fn test_not_found_error() {
    let err: BackgroundError = NotFoundSnafu {
        task_id: "bg-123",
    }
    .build();
    assert_eq!(err.status_code(), StatusCode::InvalidArguments);
    assert!(err.to_string().contains("bg-123"));
}

#[test]
fn test_io_error() {
    let err: BackgroundError = IoSnafu {
        message: "permission denied",
    }
    .build();
    assert_eq!(err.status_code(), StatusCode::IoError);
    assert!(!err.status_code().is_retryable());
}
