use std::any::Any;
use std::fmt;

use crate::StatusCategory;
use crate::StatusCode;

/// Extension implemented by every error type in the workspace so that retry
/// classification and log-worthiness live in one place: [`StatusCode`].
pub trait ErrorExt: std::error::Error {
    /// The status code this error maps to.
    fn status_code(&self) -> StatusCode;

    /// Allows downcasting a type-erased error back to its concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Shorthand for `self.status_code().is_retryable()`.
    fn is_retryable(&self) -> bool {
        self.status_code().is_retryable()
    }

    /// Shorthand for `self.status_code().should_log_error()`.
    fn should_log_error(&self) -> bool {
        self.status_code().should_log_error()
    }

    /// A message safe to surface to an end user. Internal/unknown errors are
    /// collapsed to a bare status-code reference so implementation details
    /// never leak; every other category passes its message through.
    fn output_msg(&self) -> String {
        match self.status_code().category() {
            StatusCategory::Common => format!("Internal error: {}", self.status_code() as i32),
            _ => self.to_string(),
        }
    }
}

/// A minimal error carrying just a message and a status code, for call
/// sites that don't need a dedicated error enum.
#[derive(Debug, Clone)]
pub struct PlainError {
    message: String,
    status_code: StatusCode,
}

impl PlainError {
    pub fn new(message: impl Into<String>, status_code: StatusCode) -> Self {
        Self {
            message: message.into(),
            status_code,
        }
    }
}

impl fmt::Display for PlainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PlainError {}

impl ErrorExt for PlainError {
    fn status_code(&self) -> StatusCode {
        self.status_code
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A type-erased error paired with a status code, for wrapping a
/// third-party error (`std::io::Error`, `serde_json::Error`, ...) at a
/// crate boundary without defining a dedicated variant for it.
pub struct BoxedError {
    inner: Box<dyn std::error::Error + Send + Sync>,
    status_code: StatusCode,
}

impl BoxedError {
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync) {
        self.inner.as_ref()
    }
}

impl fmt::Debug for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.inner, self.status_code)
    }
}

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl std::error::Error for BoxedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl ErrorExt for BoxedError {
    fn status_code(&self) -> StatusCode {
        self.status_code
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Wrap a third-party error with a status code.
pub fn boxed(err: impl std::error::Error + Send + Sync + 'static, status_code: StatusCode) -> BoxedError {
    BoxedError {
        inner: Box::new(err),
        status_code,
    }
}

#[cfg(test)]
#[path = "ext.test.rs"]
mod tests;
