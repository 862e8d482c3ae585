//! Session, public screens and configuration tests

mod helpers;

use std::sync::Arc;
use assert_matches::assert_matches;
use serde_json::json;
use serial_test::serial;
use rakan_admin::{
    handlers::{
        navigation, ContactFormScreen, ContactTarget, DashboardView, LoginScreen, Mounted, ProductCatalog, Route,
        ScreenContext, TestimonialsView,
    },
    models::PublicContactRequest,
    services::{AssumeYes, MemorySink, Notifier, ServiceFactory},
    state::{FileSessionStorage, SessionState, SessionStorage, SessionStore},
    AdminError, Settings,
};
use helpers::*;

fn file_session(path: &std::path::Path) -> SessionStore {
    let mut store = SessionStore::new(Box::new(FileSessionStorage::new(path)));
    store.init().expect("init session");
    store
}

fn context_for(settings: &Settings, sink: &MemorySink) -> ScreenContext {
    ScreenContext::new(
        ServiceFactory::new(settings).unwrap(),
        Notifier::new(Arc::new(sink.clone())),
        Arc::new(AssumeYes),
        settings.features.clone(),
    )
}

#[tokio::test]
async fn test_login_persists_and_restores_session() {
    let backend = BackendMockServer::new().await;
    backend.mock_login(admin_user()).await;
    let settings = test_settings(&backend.uri());
    let sink = MemorySink::new();
    let ctx = context_for(&settings, &sink);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let mut session = file_session(&path);

    let mut screen = LoginScreen::mount(&ctx, &session).screen().unwrap();
    screen.form_mut().set("user_id", " 1001 ").unwrap();
    screen.form_mut().set("password", "secret").unwrap();
    assert_eq!(screen.submit(&mut session).await.unwrap(), Route::Home);
    assert!(session.is_admin());
    assert!(path.exists());

    let requests = backend.requests_to("POST", "/api/auth/login").await;
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"user_id": "1001", "password": "secret"}));

    // A fresh process picks the session up from disk
    let restored = file_session(&path);
    assert_eq!(restored.current_user().and_then(|u| u.username.clone()).as_deref(), Some("rakan_admin"));

    let mut restored = restored;
    restored.logout().unwrap();
    assert!(!path.exists());
    assert_eq!(restored.state(), &SessionState::Anonymous);
}

#[tokio::test]
async fn test_failed_login_stays_anonymous() {
    let ctx = TestContext::anonymous().await;
    ctx.backend
        .mock(
            "POST",
            "/api/auth/login",
            MockResponseConfig {
                status: 401,
                delay_ms: None,
                body: json!({"success": false, "Message": "Invalid credentials"}),
            },
        )
        .await;

    let mut session = ctx.session;
    let mut screen = LoginScreen::mount(&ctx.ctx, &session).screen().unwrap();
    screen.form_mut().set("user_id", "1001").unwrap();
    screen.form_mut().set("password", "wrong").unwrap();

    assert_eq!(screen.submit(&mut session).await.unwrap(), Route::Login);
    assert_eq!(session.state(), &SessionState::Anonymous);
    assert_eq!(screen.error(), Some("Invalid credentials"));
    assert_eq!(ctx.sink.last().unwrap().message, "Invalid credentials");
}

#[tokio::test]
async fn test_login_with_empty_fields_sends_nothing() {
    let ctx = TestContext::anonymous().await;
    ctx.backend
        .mock_expect("POST", "/api/auth/login", MockResponseConfig::ok("user", admin_user()), 0)
        .await;

    let mut session = ctx.session;
    let mut screen = LoginScreen::mount(&ctx.ctx, &session).screen().unwrap();
    screen.form_mut().set("user_id", "1001").unwrap();

    assert_eq!(screen.submit(&mut session).await.unwrap(), Route::Login);
    assert!(screen.error().is_some());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_login_screen_redirects_signed_in_users() {
    let ctx = TestContext::member().await;
    assert!(matches!(LoginScreen::mount(&ctx.ctx, &ctx.session), Mounted::Redirect(Route::Home)));
}

#[tokio::test]
async fn test_corrupted_session_file_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    let session = file_session(&path);
    assert!(!session.is_authenticated());
    assert!(!path.exists());
    assert_eq!(FileSessionStorage::new(&path).load().unwrap(), None);
}

#[tokio::test]
async fn test_dashboard_for_member_and_anonymous() {
    let member = TestContext::member().await;
    let view = DashboardView::mount(&member.session).screen().unwrap();
    assert_eq!(view.name, "Maya");
    assert_eq!(view.approval_period, "Jan 1, 2025 - Jan 31, 2025");
    assert_eq!(view.days_remaining, "12");
    assert!(view.to_string().contains("Welcome back, Maya"));

    let anonymous = TestContext::anonymous().await;
    assert!(matches!(DashboardView::mount(&anonymous.session), Mounted::Redirect(Route::Login)));
}

#[tokio::test]
async fn test_navigation_reflects_role() {
    let admin = TestContext::admin().await;
    let labels: Vec<&str> = navigation(&admin.session).iter().map(|item| item.label).collect();
    assert!(labels.contains(&"User Management"));
    assert!(!labels.contains(&"Login"));
}

#[tokio::test]
async fn test_testimonials_failure_leaves_section_empty() {
    let ctx = TestContext::anonymous().await;
    ctx.backend.mock_html_error("GET", "/api/customer-comments", 503).await;

    let view = TestimonialsView::load(&ctx.ctx).await;
    assert!(view.comments.is_empty());
    assert!(ctx.sink.toasts().is_empty());
}

#[tokio::test]
async fn test_products_are_gated_by_tier() {
    let ctx = TestContext::member().await;
    let six = serde_json::Value::Array((1..=6).map(|id| video(id, &format!("Lesson {}", id), true)).collect());
    ctx.backend.mock_videos(six).await;

    let catalog = ProductCatalog::load(&ctx.ctx, &ctx.session).await.unwrap();
    assert_eq!(catalog.products.len(), 4);
    assert_eq!(catalog.hidden(), 2);
}

#[tokio::test]
async fn test_contact_forms_post_to_their_endpoints() {
    let ctx = TestContext::anonymous().await;
    ctx.backend.mock("POST", "/api/contact", MockResponseConfig::message("Thanks!")).await;
    ctx.backend
        .mock("POST", "/api/contact-submissions", MockResponseConfig::message("Stored"))
        .await;

    let request = PublicContactRequest {
        name: "Nadia".to_string(),
        company: String::new(),
        email: "nadia@example.com".to_string(),
        role: String::new(),
        message: "Tell me more".to_string(),
    };

    // A finished send leaves the form ready for the next one
    let landing = ContactFormScreen::new(&ctx.ctx, ContactTarget::Landing);
    landing.submit(&request).await.unwrap();
    landing.submit(&request).await.unwrap();
    assert_eq!(ctx.last_toast(), "Thanks!");
    ContactFormScreen::new(&ctx.ctx, ContactTarget::ContactPage).submit(&request).await.unwrap();
    assert_eq!(ctx.last_toast(), "Stored");

    let invalid = PublicContactRequest {
        email: "not-an-email".to_string(),
        ..request
    };
    assert_matches!(
        landing.submit(&invalid).await,
        Err(AdminError::InvalidInput(message)) if message == "Please enter a valid email address"
    );
    assert_eq!(ctx.backend.requests_to("POST", "/api/contact").await.len(), 2);
}

#[test]
#[serial]
fn test_environment_overrides_defaults() {
    std::env::set_var("RAKAN_API__BASE_URL", "http://127.0.0.1:9000");
    std::env::set_var("RAKAN_FEATURES__CONFIRM_DESTRUCTIVE", "false");

    let settings = Settings::new();

    std::env::remove_var("RAKAN_API__BASE_URL");
    std::env::remove_var("RAKAN_FEATURES__CONFIRM_DESTRUCTIVE");

    let settings = settings.expect("settings load");
    assert_eq!(settings.api.base_url, "http://127.0.0.1:9000");
    assert!(!settings.features.confirm_destructive);
    assert_eq!(settings.api.timeout_seconds, 30);
}

#[test]
#[serial]
fn test_invalid_base_url_fails_validation() {
    let mut settings = Settings::default();
    settings.api.base_url = "not a url".to_string();
    assert_matches!(settings.validate(), Err(AdminError::Config(_)));
}
