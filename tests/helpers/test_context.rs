//! Test context for integration tests
//!
//! Wires a mock backend, in-memory session and recording notifier into a
//! [`ScreenContext`] the way the console binary does.

use std::sync::Arc;
use serde_json::Value;
use rakan_admin::{
    config::Settings,
    handlers::ScreenContext,
    models::SessionUser,
    services::{AssumeYes, Confirmer, MemorySink, Notifier, ServiceFactory},
    state::{MemorySessionStorage, SessionStorage, SessionStore},
};
use super::backend_mock::BackendMockServer;
use super::test_data::{admin_user, member_user};

pub struct TestContext {
    pub backend: BackendMockServer,
    pub settings: Settings,
    pub ctx: ScreenContext,
    pub sink: MemorySink,
    pub session: SessionStore,
}

impl TestContext {
    /// Anonymous session against a fresh mock backend
    pub async fn anonymous() -> Self {
        Self::build(None, Arc::new(AssumeYes)).await
    }

    pub async fn admin() -> Self {
        Self::build(Some(admin_user()), Arc::new(AssumeYes)).await
    }

    pub async fn member() -> Self {
        Self::build(Some(member_user()), Arc::new(AssumeYes)).await
    }

    pub async fn admin_with_confirmer(confirmer: Arc<dyn Confirmer>) -> Self {
        Self::build(Some(admin_user()), confirmer).await
    }

    async fn build(user: Option<Value>, confirmer: Arc<dyn Confirmer>) -> Self {
        let backend = BackendMockServer::new().await;
        let settings = test_settings(&backend.uri());

        let sink = MemorySink::new();
        let services = ServiceFactory::new(&settings).expect("Failed to create services");
        let ctx = ScreenContext::new(
            services,
            Notifier::new(Arc::new(sink.clone())),
            confirmer,
            settings.features.clone(),
        );

        let storage = MemorySessionStorage::new();
        if let Some(user) = user {
            let user: SessionUser = serde_json::from_value(user).expect("valid session user");
            storage.save(&user).expect("Failed to seed session");
        }
        let mut session = SessionStore::new(Box::new(storage));
        session.init().expect("Failed to init session");

        Self {
            backend,
            settings,
            ctx,
            sink,
            session,
        }
    }

    /// Message of the most recent toast
    pub fn last_toast(&self) -> String {
        self.sink.last().map(|toast| toast.message).unwrap_or_default()
    }
}

/// Default settings pointed at the mock backend
pub fn test_settings(base_url: &str) -> Settings {
    let mut settings = Settings::default();
    settings.api.base_url = base_url.to_string();
    settings.api.storage_url = format!("{}/storage/app/public/", base_url);
    settings.api.timeout_seconds = 5;
    settings.session.persist = false;
    settings
}
