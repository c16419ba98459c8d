//! Medfin Core Library
//!
//! This crate provides core domain models, error types, configuration, and
//! constants that are shared across all medfin components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::PortalConfig;
pub use error::{AppError, ErrorMetadata, LogLevel};
