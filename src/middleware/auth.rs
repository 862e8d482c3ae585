//! Authentication middleware
//!
//! One access guard decides whether the current session may open a screen.
//! Anonymous visitors are sent to the login screen; signed-in users without
//! admin rights are refused inline.

use tracing::{debug, warn};
use crate::models::SessionUser;
use crate::state::SessionStore;
use crate::utils::errors::{AdminError, Result};

/// What a screen requires of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Public,
    Authenticated,
    Admin,
}

/// Outcome of an access check
#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    /// Carries the signed-in user, if any
    Granted(Option<SessionUser>),
    LoginRequired,
    Denied(String),
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted(_))
    }
}

/// Authentication middleware
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGuard;

impl AccessGuard {
    /// Check the session against a screen's requirement
    pub fn check(session: &SessionStore, level: AccessLevel) -> Access {
        let user = session.current_user().cloned();

        match (level, user) {
            (AccessLevel::Public, user) => Access::Granted(user),
            (_, None) => {
                debug!(level = ?level, "Access requires login");
                Access::LoginRequired
            }
            (AccessLevel::Authenticated, Some(user)) => Access::Granted(Some(user)),
            (AccessLevel::Admin, Some(user)) if user.is_admin => Access::Granted(Some(user)),
            (AccessLevel::Admin, Some(user)) => {
                warn!(user = %user.display_name(), "Unauthorized admin access attempt");
                Access::Denied("Admin privileges required".to_string())
            }
        }
    }

    /// Like [`check`](Self::check), but as a `Result` for `?` propagation
    pub fn require(session: &SessionStore, level: AccessLevel) -> Result<Option<SessionUser>> {
        match Self::check(session, level) {
            Access::Granted(user) => Ok(user),
            Access::LoginRequired => Err(AdminError::AuthenticationRequired),
            Access::Denied(reason) => Err(AdminError::PermissionDenied(reason)),
        }
    }
}
