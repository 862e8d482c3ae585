//! Session store
//!
//! Holds the signed-in user for the lifetime of the program. The store is
//! created once, hydrated from persisted storage with [`SessionStore::init`]
//! and handed to every screen explicitly.

use tracing::info;
use crate::models::{LoginRequest, SessionUser};
use crate::services::AuthService;
use crate::utils::errors::Result;
use crate::utils::logging::log_session_event;
use super::storage::SessionStorage;

/// Authentication state of the session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Anonymous,
    Authenticated(SessionUser),
}

pub struct SessionStore {
    state: SessionState,
    storage: Box<dyn SessionStorage>,
    splash_shown: bool,
}

impl SessionStore {
    /// Create an anonymous store; call [`init`](Self::init) to hydrate it
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self {
            state: SessionState::Anonymous,
            storage,
            splash_shown: false,
        }
    }

    /// Restore a previously persisted session
    pub fn init(&mut self) -> Result<&SessionState> {
        self.state = match self.storage.load()? {
            Some(user) => {
                info!(user = %user.display_name(), "Session restored");
                SessionState::Authenticated(user)
            }
            None => SessionState::Anonymous,
        };
        Ok(&self.state)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(|user| user.is_admin)
    }

    /// Post credentials; the store only becomes authenticated on success
    pub async fn login(&mut self, auth: &AuthService, user_id: &str, password: &str) -> Result<SessionUser> {
        let request = LoginRequest {
            user_id: user_id.trim().to_string(),
            password: password.to_string(),
        };

        let user = match auth.login(&request).await {
            Ok(user) => user,
            Err(e) => {
                log_session_event("login", Some(&request.user_id), false);
                return Err(e);
            }
        };

        self.storage.save(&user)?;
        log_session_event("login", Some(&request.user_id), true);
        self.state = SessionState::Authenticated(user.clone());
        Ok(user)
    }

    /// Drop the session from memory and persisted storage
    pub fn logout(&mut self) -> Result<()> {
        let user_id = self.current_user().and_then(|u| u.login_id());
        self.storage.clear()?;
        self.state = SessionState::Anonymous;
        self.splash_shown = false;
        log_session_event("logout", user_id.as_deref(), true);
        Ok(())
    }

    /// Returns `true` the first time it is called in this session
    pub fn take_splash(&mut self) -> bool {
        !std::mem::replace(&mut self.splash_shown, true)
    }
}
