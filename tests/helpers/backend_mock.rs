//! Mock content backend for testing
//!
//! This module provides a mock HTTP server that answers like the Laravel
//! backend, wrapping every payload in the `{success, ...}` envelope.

use std::time::Duration;
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

pub const STATS_ROUTE: &str = "/api/bot-registrations-stats/statistics";

/// Mock backend server for testing
pub struct BackendMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub status: u16,
    pub delay_ms: Option<u64>,
    pub body: Value,
}

impl MockResponseConfig {
    /// `{success: true, <key>: payload}`
    pub fn ok(key: &str, payload: Value) -> Self {
        let mut body = json!({"success": true});
        body[key] = payload;
        Self {
            status: 200,
            delay_ms: None,
            body,
        }
    }

    /// `{success: true, message}`
    pub fn message(message: &str) -> Self {
        Self {
            status: 200,
            delay_ms: None,
            body: json!({"success": true, "message": message}),
        }
    }

    /// `{success: false, message}`
    pub fn failure(message: &str) -> Self {
        Self {
            status: 200,
            delay_ms: None,
            body: json!({"success": false, "message": message}),
        }
    }

    /// `{success: false, errors}` with a 422 status, as Laravel validation does
    pub fn validation(errors: Value) -> Self {
        Self {
            status: 422,
            delay_ms: None,
            body: json!({"success": false, "errors": errors}),
        }
    }

    pub fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    fn template(&self) -> ResponseTemplate {
        let mut response = ResponseTemplate::new(self.status).set_body_json(self.body.clone());
        if let Some(delay) = self.delay_ms {
            response = response.set_delay(Duration::from_millis(delay));
        }
        response
    }
}

impl BackendMockServer {
    /// Start a new mock backend
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Answer `verb route` with `config`
    pub async fn mock(&self, verb: &str, route: &str, config: MockResponseConfig) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(config.template())
            .mount(&self.server)
            .await;
    }

    /// Answer `verb route` with `config`, expecting exactly `times` calls
    pub async fn mock_expect(&self, verb: &str, route: &str, config: MockResponseConfig, times: u64) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(config.template())
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Answer the first `verb route` call with `config`; later calls fall
    /// through to mocks mounted after this one
    pub async fn mock_once(&self, verb: &str, route: &str, config: MockResponseConfig) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(config.template())
            .up_to_n_times(1)
            .mount(&self.server)
            .await;
    }

    /// Answer with a non-JSON error page
    pub async fn mock_html_error(&self, verb: &str, route: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string("<html>Server Error</html>"))
            .mount(&self.server)
            .await;
    }

    /// Setup the default login endpoint for `user`
    pub async fn mock_login(&self, user: Value) {
        self.mock("POST", "/api/auth/login", MockResponseConfig::ok("user", user)).await;
    }

    /// Setup the video collection
    pub async fn mock_videos(&self, videos: Value) {
        self.mock("GET", "/api/website-videos", MockResponseConfig::ok("videos", videos)).await;
    }

    /// Setup the users collection and statistics
    pub async fn mock_users(&self, users: Value, stats: Value) {
        self.mock("GET", "/api/bot-registrations", MockResponseConfig::ok("data", users)).await;
        self.mock("GET", STATS_ROUTE, MockResponseConfig::ok("data", stats)).await;
    }

    /// Setup the users collection with statistics that change after the first load
    pub async fn mock_users_then_stats(&self, users: Value, first: Value, then: Value) {
        self.mock("GET", "/api/bot-registrations", MockResponseConfig::ok("data", users)).await;
        self.mock_once("GET", STATS_ROUTE, MockResponseConfig::ok("data", first)).await;
        self.mock("GET", STATS_ROUTE, MockResponseConfig::ok("data", then)).await;
    }

    /// Requests received so far for `verb route`
    pub async fn requests_to(&self, verb: &str, route: &str) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.method.as_str() == verb && request.url.path() == route)
            .collect()
    }
}

/// Raw body of a request as lossy UTF-8
pub fn body_text(request: &Request) -> String {
    String::from_utf8_lossy(&request.body).into_owned()
}

/// Whether a multipart body carries a part named `field`
pub fn has_multipart_field(request: &Request, field: &str) -> bool {
    body_text(request).contains(&format!("name=\"{}\"", field))
}
