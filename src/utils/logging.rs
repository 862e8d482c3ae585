//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the admin client.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{AdminError, Result};

/// Initialize logging based on configuration
///
/// The returned guard must be held for the lifetime of the program when
/// file logging is enabled, otherwise buffered lines are lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let stderr_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = if config.file_path.is_empty() {
        (None, None)
    } else {
        let file_appender = tracing_appender::rolling::daily(&config.file_path, "rakan-admin.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking);
        (Some(layer), Some(guard))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| AdminError::Config(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log an outgoing backend call and its outcome
pub fn log_api_call(method: &str, path: &str, status: Option<u16>, duration_ms: u64) {
    match status {
        Some(code) if code < 400 => debug!(
            method = method,
            path = path,
            status = code,
            duration_ms = duration_ms,
            "API call completed"
        ),
        Some(code) => warn!(
            method = method,
            path = path,
            status = code,
            duration_ms = duration_ms,
            "API call returned error status"
        ),
        None => warn!(
            method = method,
            path = path,
            duration_ms = duration_ms,
            "API call failed before a response"
        ),
    }
}

/// Log admin mutations
pub fn log_admin_action(admin_id: Option<i64>, action: &str, target: Option<&str>, details: Option<&str>) {
    info!(
        admin_id = admin_id,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &AdminError, context: Option<&str>) {
    error!(
        api = api,
        error = %error,
        severity = %error.severity(),
        context = context,
        "API error occurred"
    );
}

/// Log session lifecycle events
pub fn log_session_event(event: &str, user_id: Option<&str>, success: bool) {
    if success {
        info!(event = event, user_id = user_id, "Session event");
    } else {
        warn!(event = event, user_id = user_id, "Session event failed");
    }
}
