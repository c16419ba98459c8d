//! Error types module
//!
//! This module provides the core error types used throughout the medfin
//! application. All errors are unified under the `AppError` enum, which can
//! represent validation, transport, remote-service, and session-store errors.
//!
//! The propagation policy is "catch at the boundary, display locally": an
//! error degrades only the document or field it affects and is surfaced to
//! the user through `ErrorMetadata::client_message`.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like transport failures
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their presentation characteristics
pub trait ErrorMetadata {
    /// HTTP-style status code associated with the error
    fn status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "VALIDATION_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether the operation can be re-triggered by the user
    fn is_recoverable(&self) -> bool;

    /// User-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Submission rejected: {0}")]
    PolicyRejected(String),

    #[error("Session store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Error conversion implementations
impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Static metadata per variant: (status, error_code, recoverable, log_level).
/// client_message stays per-variant for dynamic content.
fn static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::Validation(_) => (400, "VALIDATION_ERROR", true, LogLevel::Debug),
        AppError::Transport(_) => (502, "NETWORK_ERROR", true, LogLevel::Warn),
        AppError::Api { .. } => (502, "SERVICE_ERROR", true, LogLevel::Warn),
        AppError::Unauthorized(_) => (401, "UNAUTHORIZED", false, LogLevel::Debug),
        AppError::NotFound(_) => (404, "NOT_FOUND", false, LogLevel::Debug),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, LogLevel::Debug),
        AppError::PolicyRejected(_) => (422, "POLICY_REJECTED", false, LogLevel::Debug),
        AppError::Store(_) => (500, "SESSION_STORE_ERROR", true, LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn status_code(&self) -> u16 {
        match self {
            AppError::Api { status, .. } => *status,
            _ => static_metadata(self).0,
        }
    }

    fn error_code(&self) -> &'static str {
        static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Transport(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            // Server-reported business errors are surfaced verbatim.
            AppError::Api { message, .. } => message.clone(),
            AppError::Unauthorized(_) => {
                "You are not logged in. Please log in to continue.".to_string()
            }
            AppError::NotFound(msg) => msg.clone(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::PolicyRejected(msg) => msg.clone(),
            AppError::Store(_) => "Failed to read saved session data".to_string(),
            AppError::Internal(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_validation() {
        let err = AppError::Validation("File too large".to_string());
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "File too large");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_api_surfaces_server_message_verbatim() {
        let err = AppError::Api {
            status: 409,
            message: "An application with this CNIC already exists".to_string(),
        };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "SERVICE_ERROR");
        assert_eq!(
            err.client_message(),
            "An application with this CNIC already exists"
        );
    }

    #[test]
    fn test_error_metadata_transport_hides_detail() {
        let err = AppError::Transport("connection refused".to_string());
        assert_eq!(err.status_code(), 502);
        assert!(err.is_recoverable());
        assert!(!err.client_message().contains("connection refused"));
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_error_metadata_unauthorized_is_blocking() {
        let err = AppError::Unauthorized("no token".to_string());
        assert_eq!(err.status_code(), 401);
        assert!(!err.is_recoverable());
        assert!(err.client_message().contains("log in"));
    }

    #[test]
    fn test_error_metadata_policy_rejected() {
        let err = AppError::PolicyRejected(
            "Government employees are not eligible for this scheme".to_string(),
        );
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "POLICY_REJECTED");
        assert!(!err.is_recoverable());
    }
}
