//! Data models for the application
//!
//! This module contains all data structures used throughout the portal,
//! organized by domain. Each sub-module represents a specific feature area.

mod application;
mod document;
mod draft;
mod extraction;
mod scheme;
mod user;

// Re-export all models for convenient imports
pub use application::*;
pub use document::*;
pub use draft::*;
pub use extraction::*;
pub use scheme::*;
pub use user::*;
