//! Notification service implementation
//!
//! Toast-style feedback for the outcome of user actions and confirmation
//! prompts guarding destructive ones. Sinks and confirmers are traits so the
//! console front-end and tests can plug in their own.

use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use crate::utils::errors::AdminError;

/// Severity of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

/// One piece of user feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// Destination for toasts
pub trait NotificationSink: Send + Sync {
    fn publish(&self, toast: &Toast);
}

/// Writes toasts to stdout/stderr
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn publish(&self, toast: &Toast) {
        match toast.level {
            ToastLevel::Success => println!("✔ {}", toast.message),
            ToastLevel::Info => println!("{}", toast.message),
            ToastLevel::Error => eprintln!("✘ {}", toast.message),
        }
    }
}

/// Keeps toasts in memory for later inspection
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts().pop()
    }
}

impl NotificationSink for MemorySink {
    fn publish(&self, toast: &Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast.clone());
        }
    }
}

/// Front door used by screens to report outcomes
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn NotificationSink>,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").finish_non_exhaustive()
    }
}

impl Notifier {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    pub fn console() -> Self {
        Self::new(Arc::new(ConsoleSink))
    }

    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        info!(message = %message, "Success notification");
        self.sink.publish(&Toast {
            level: ToastLevel::Success,
            message,
        });
    }

    pub fn info(&self, message: impl Into<String>) {
        self.sink.publish(&Toast {
            level: ToastLevel::Info,
            message: message.into(),
        });
    }

    /// Report a failure using the error's user-facing text
    pub fn error(&self, error: &AdminError) {
        if matches!(error, AdminError::Cancelled) {
            return;
        }
        let message = error.user_message();
        warn!(error = %error, severity = %error.severity(), "Error notification");
        self.sink.publish(&Toast {
            level: ToastLevel::Error,
            message,
        });
    }
}

/// Asks the user to confirm a destructive action
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirms everything (`--yes`, or confirmation disabled in settings)
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Declines everything
#[derive(Debug, Default, Clone, Copy)]
pub struct Decline;

impl Confirmer for Decline {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// Interactive `[y/N]` prompt on the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FieldErrors;

    #[test]
    fn test_validation_errors_are_joined_into_one_toast() {
        let sink = MemorySink::new();
        let notifier = Notifier::new(Arc::new(sink.clone()));

        let mut errors = FieldErrors::default();
        errors.push("email", "The email field is required.");
        errors.push("name", "The name field is required.");
        notifier.error(&AdminError::Validation(errors));

        let toast = sink.last().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(
            toast.message,
            "Please fix the following errors:\nThe email field is required.\nThe name field is required."
        );
    }

    #[test]
    fn test_cancelled_requests_are_silent() {
        let sink = MemorySink::new();
        let notifier = Notifier::new(Arc::new(sink.clone()));
        notifier.error(&AdminError::Cancelled);
        assert!(sink.toasts().is_empty());
    }

    #[test]
    fn test_network_errors_use_generic_text() {
        let sink = MemorySink::new();
        let notifier = Notifier::new(Arc::new(sink.clone()));
        notifier.error(&AdminError::Network("connection refused".to_string()));
        assert_eq!(sink.last().unwrap().message, "Network error. Please try again.");
    }
}
