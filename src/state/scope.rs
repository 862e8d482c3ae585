//! View scopes
//!
//! A scope lives as long as one screen. Closing or dropping it cancels every
//! request issued through clients bound to it.

use tokio_util::sync::CancellationToken;
use crate::api::ApiClient;

#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose requests end when this scope closes
    pub fn bind(&self, api: &ApiClient) -> ApiClient {
        api.with_cancellation(self.token.child_token())
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
