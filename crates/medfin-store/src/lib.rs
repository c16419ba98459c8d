//! Medfin Session Store
//!
//! This crate provides the durable client-side key/value state the portal
//! carries across independently-routed pages: bearer token, user profile,
//! loan amount, and purpose selection. It includes the `SessionStore` trait
//! and implementations for memory and a JSON session file.
//!
//! Access is last-write-wins with no transactional guarantees; a single
//! writer is assumed.

pub mod file;
pub mod memory;
pub mod session;

use async_trait::async_trait;
use thiserror::Error;

/// Session store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Corrupt session data: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for medfin_core::AppError {
    fn from(err: StoreError) -> Self {
        medfin_core::AppError::Store(err.to_string())
    }
}

/// Key/value persistence abstraction.
///
/// Stands in for the browser's durable storage so session handling is
/// testable without a real storage API. Values are opaque strings; typed
/// access lives in [`session::Session`].
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    async fn remove(&self, key: &str) -> StoreResult<()>;
}

// Re-export commonly used types
pub use file::FileStore;
pub use memory::MemoryStore;
pub use session::Session;

#[cfg(test)]
mod tests {
    use super::*;
    use medfin_core::AppError;

    #[test]
    fn test_store_error_maps_to_app_error() {
        let err = AppError::from(StoreError::Corrupt("not json".to_string()));
        match err {
            AppError::Store(message) => assert!(message.contains("not json")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
