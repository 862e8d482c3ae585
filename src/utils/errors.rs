//! Error handling for Rakan Admin
//!
//! This module defines the main error type used throughout the client
//! and the user-facing text each failure is reported with.

use thiserror::Error;
use crate::api::envelope::FieldErrors;

/// Message shown for every transport-level failure
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Main error type for Rakan Admin
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {message}")]
    Server { message: String },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: i64 },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("A submission is already in progress")]
    SubmitInProgress,

    #[error("Request cancelled")]
    Cancelled,

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Rakan Admin operations
pub type Result<T> = std::result::Result<T, AdminError>;

impl From<config::ConfigError> for AdminError {
    fn from(err: config::ConfigError) -> Self {
        AdminError::Config(err.to_string())
    }
}

impl AdminError {
    /// Build a server failure from an optional backend message
    pub fn server(message: Option<String>, fallback: &str) -> Self {
        AdminError::Server {
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// Text shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            AdminError::Network(_) | AdminError::Http(_) => NETWORK_ERROR_MESSAGE.to_string(),
            AdminError::Server { message } => message.clone(),
            AdminError::Validation(errors) => {
                format!("Please fix the following errors:\n{}", errors.joined())
            }
            AdminError::AuthenticationRequired => "You need to be logged in to continue.".to_string(),
            AdminError::PermissionDenied(reason) => format!("Access denied: {}", reason),
            AdminError::InvalidInput(reason) => reason.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the request never produced a usable backend answer
    pub fn is_network(&self) -> bool {
        matches!(self, AdminError::Network(_) | AdminError::Http(_))
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AdminError::Config(_) => ErrorSeverity::Critical,
            AdminError::Io(_) => ErrorSeverity::Critical,
            AdminError::PermissionDenied(_) => ErrorSeverity::Warning,
            AdminError::AuthenticationRequired => ErrorSeverity::Warning,
            AdminError::SubmitInProgress => ErrorSeverity::Warning,
            AdminError::Cancelled => ErrorSeverity::Info,
            AdminError::InvalidInput(_) => ErrorSeverity::Info,
            AdminError::Validation(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
