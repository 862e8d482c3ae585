//! Rakan Admin
//!
//! Typed client and console for the iGenius/Rakan content backend.
//! This library provides the session store, a generic resource client over
//! the backend's `{success, data|message|errors}` envelope, and the screens
//! used to manage videos, contact submissions, bot-registered users and
//! customer comments.

pub mod api;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{AdminError, Result};

// Re-export main components for easy access
pub use api::{ApiClient, Resource, ResourceClient};
pub use services::ServiceFactory;
pub use state::{SessionStore, ListView, ViewScope};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
