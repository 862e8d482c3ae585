//! Middleware module
//!
//! This module contains the access checks run before a screen mounts

pub mod auth;

// Re-export commonly used middleware
pub use auth::{Access, AccessGuard, AccessLevel};
