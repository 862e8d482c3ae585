//! Authentication service implementation
//!
//! This service posts credentials to the backend login endpoint and decodes
//! the returned session user. It never stores anything itself; the
//! [`SessionStore`](crate::state::SessionStore) owns the resulting session.

use tracing::{debug, info};
use crate::api::{ApiClient, RequestBody};
use crate::models::{LoginRequest, SessionUser};
use crate::utils::errors::{AdminError, Result};
use crate::utils::logging::log_api_error;

pub const LOGIN_PATH: &str = "/api/auth/login";
const LOGIN_FAILED: &str = "Login failed";

/// Authentication service for the admin backend
#[derive(Clone, Debug)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for the session user
    pub async fn login(&self, request: &LoginRequest) -> Result<SessionUser> {
        if request.user_id.trim().is_empty() || request.password.is_empty() {
            return Err(AdminError::InvalidInput("User ID and password are required".to_string()));
        }

        debug!(user_id = %request.user_id, "Attempting login");

        let result = async {
            self.api
                .post(LOGIN_PATH, RequestBody::json(request)?)
                .await?
                .into_outcome::<SessionUser>(&["user", "data"])?
                .into_result(LOGIN_FAILED)
        }
        .await;

        match result {
            Ok(user) => {
                info!(user_id = %request.user_id, is_admin = user.is_admin, "Login accepted");
                Ok(user)
            }
            Err(e) => {
                log_api_error("auth", &e, Some("login"));
                Err(e)
            }
        }
    }
}
