//! HTTP transport for the content backend
//!
//! A thin wrapper over `reqwest` that sends one request, never retries,
//! and hands back the parsed [`Envelope`]. Clients bound to a view scope
//! abort their in-flight request when the scope closes.

use std::time::{Duration, Instant};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method};
use tokio_util::sync::CancellationToken;
use tracing::{debug, Instrument};
use crate::api::envelope::Envelope;
use crate::api::payload::RequestBody;
use crate::config::ApiConfig;
use crate::utils::errors::{AdminError, Result};
use crate::utils::helpers::generate_request_id;
use crate::utils::logging::log_api_call;

/// Backend client shared by every resource
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    storage_url: String,
    cancel: Option<CancellationToken>,
}

impl ApiClient {
    /// Create a new ApiClient from backend configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            storage_url: config.storage_url.clone(),
            cancel: None,
        })
    }

    /// Clone of this client whose requests abort once `token` is cancelled
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a stored file path
    pub fn resolve_file_url(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with("http") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.storage_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn endpoint(&self, path: &str) -> Result<url::Url> {
        Ok(url::Url::parse(&format!("{}{}", self.base_url, path))?)
    }

    pub async fn get(&self, path: &str) -> Result<Envelope> {
        self.send(Method::GET, path, RequestBody::Empty).await
    }

    pub async fn post(&self, path: &str, body: RequestBody) -> Result<Envelope> {
        self.send(Method::POST, path, body).await
    }

    pub async fn put(&self, path: &str, body: RequestBody) -> Result<Envelope> {
        self.send(Method::PUT, path, body).await
    }

    pub async fn delete(&self, path: &str) -> Result<Envelope> {
        self.send(Method::DELETE, path, RequestBody::Empty).await
    }

    /// Send one request and parse the envelope
    pub async fn send(&self, method: Method, path: &str, body: RequestBody) -> Result<Envelope> {
        let url = self.endpoint(path)?;
        let request_id = generate_request_id();
        let span = tracing::debug_span!("api_request", request_id = %request_id, method = %method, path = path);

        let mut request = self.client.request(method.clone(), url).header(ACCEPT, "application/json");
        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Form(form) => request.multipart(form.into_multipart()?),
        };

        let started = Instant::now();
        let exchange = async move {
            let response = request.send().await?;
            let status = response.status();
            let bytes = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, bytes))
        }
        .instrument(span);

        let outcome = match &self.cancel {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!(method = %method, path = path, "Request cancelled by view scope");
                        return Err(AdminError::Cancelled);
                    }
                    result = exchange => result,
                }
            }
            None => exchange.await,
        };

        let elapsed = started.elapsed().as_millis() as u64;
        let (status, bytes) = match outcome {
            Ok(pair) => pair,
            Err(e) => {
                log_api_call(method.as_str(), path, None, elapsed);
                return Err(if e.is_timeout() {
                    AdminError::Network("request timed out".to_string())
                } else {
                    AdminError::Network(e.to_string())
                });
            }
        };

        log_api_call(method.as_str(), path, Some(status.as_u16()), elapsed);

        match Envelope::parse(&bytes) {
            Some(envelope) => Ok(envelope),
            None if status.is_success() => Err(AdminError::Server {
                message: "Unexpected response from server".to_string(),
            }),
            None => Err(AdminError::Network(format!("HTTP {}", status))),
        }
    }
}
