//! Services module
//!
//! This module contains the backend-facing services, one per collection

pub mod auth;
pub mod contacts;
pub mod notification;
pub mod public;
pub mod registrations;
pub mod videos;

// Re-export commonly used services
pub use auth::AuthService;
pub use contacts::ContactService;
pub use notification::{AssumeYes, Confirmer, ConsoleSink, Decline, MemorySink, NotificationSink, Notifier, StdinConfirmer, Toast, ToastLevel};
pub use public::PublicService;
pub use registrations::{RegistrationService, EMPTY_SELECTION_MESSAGE};
pub use videos::VideoService;

use crate::api::ApiClient;
use crate::config::settings::Settings;
use crate::state::ViewScope;
use crate::utils::errors::Result;

/// Service factory for the services shared across screens.
///
/// Collection screens build their own [`ContactService`] or
/// [`RegistrationService`] on the client bound to their view scope.
#[derive(Clone, Debug)]
pub struct ServiceFactory {
    pub api: ApiClient,
    pub auth_service: AuthService,
    pub video_service: VideoService,
    pub public_service: PublicService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings) -> Result<Self> {
        let api = ApiClient::new(&settings.api)?;
        Ok(Self::from_client(api))
    }

    /// Build every service on top of one shared client
    pub fn from_client(api: ApiClient) -> Self {
        Self {
            auth_service: AuthService::new(api.clone()),
            video_service: VideoService::new(api.clone()),
            public_service: PublicService::new(api.clone()),
            api,
        }
    }

    /// Services whose requests are cancelled when `scope` closes
    pub fn scoped(&self, scope: &ViewScope) -> Self {
        Self::from_client(scope.bind(&self.api))
    }
}
