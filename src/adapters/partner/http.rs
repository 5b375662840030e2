//! HTTP partner client - Implementation of PartnerApi over the partner's REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpPartnerConfig::new("https://partner.example.com")
//!     .with_api_key(api_key)
//!     .with_timeout(Duration::from_secs(10));
//!
//! let partner = HttpPartnerApi::new(config);
//! ```
//!
//! # Endpoints
//!
//! Fetch and enrichment are GETs under `/v1/examples/{id}`, validation and
//! notification are POSTs with JSON bodies. Every call is authenticated with
//! a bearer token when an API key is configured, and bounded by the
//! per-request timeout; an elapsed timeout surfaces as `PartnerError::Timeout`,
//! everything else as `PartnerError::Unavailable`.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::PartnerConfig;
use crate::domain::foundation::ExampleId;
use crate::ports::{EnrichmentData, ExternalData, PartnerApi, PartnerError};

/// Configuration for the HTTP partner client.
#[derive(Debug, Clone)]
pub struct HttpPartnerConfig {
    /// API key sent as a bearer token (omitted when absent).
    api_key: Option<Secret<String>>,
    /// Base URL of the partner service, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpPartnerConfig {
    /// Creates a new configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_key: None,
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }
}

impl From<&PartnerConfig> for HttpPartnerConfig {
    fn from(config: &PartnerConfig) -> Self {
        let mut http_config =
            Self::new(config.base_url.trim_end_matches('/')).with_timeout(config.timeout());

        if let Some(api_key) = &config.api_key {
            http_config = http_config.with_api_key(api_key.clone());
        }

        http_config
    }
}

/// HTTP partner API client.
pub struct HttpPartnerApi {
    config: HttpPartnerConfig,
    client: Client,
}

impl HttpPartnerApi {
    /// Creates a new client with the given configuration.
    pub fn new(config: HttpPartnerConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the external-data endpoint URL.
    fn data_url(&self, id: ExampleId) -> String {
        format!("{}/v1/examples/{}/data", self.config.base_url, id)
    }

    /// Builds the validation endpoint URL.
    fn validate_url(&self) -> String {
        format!("{}/v1/validate", self.config.base_url)
    }

    /// Builds the enrichment endpoint URL.
    fn enrichment_url(&self, id: ExampleId) -> String {
        format!("{}/v1/examples/{}/enrichment", self.config.base_url, id)
    }

    /// Builds the creation-notification endpoint URL.
    fn notifications_url(&self) -> String {
        format!("{}/v1/notifications", self.config.base_url)
    }

    /// Attaches the bearer token when an API key is configured.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.api_key() {
            Some(api_key) => request.bearer_auth(api_key),
            None => request,
        }
    }

    /// Maps a transport-level failure onto the port error.
    fn map_transport_error(&self, err: reqwest::Error) -> PartnerError {
        if err.is_timeout() {
            PartnerError::timeout(format!(
                "request exceeded {}s",
                self.config.timeout.as_secs()
            ))
        } else if err.is_connect() {
            PartnerError::unavailable(format!("connection failed: {}", err))
        } else {
            PartnerError::unavailable(err.to_string())
        }
    }

    /// Checks the response status and maps failures onto the port error.
    async fn ensure_success(&self, response: Response) -> Result<Response, PartnerError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            408 | 504 => Err(PartnerError::timeout(format!(
                "partner answered {}: {}",
                status, error_body
            ))),
            _ => Err(PartnerError::unavailable(format!(
                "partner answered {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl PartnerApi for HttpPartnerApi {
    async fn fetch_data(&self, id: ExampleId) -> Result<ExternalData, PartnerError> {
        let response = self
            .authorize(self.client.get(self.data_url(id)))
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let response = self.ensure_success(response).await?;

        response
            .json::<ExternalData>()
            .await
            .map_err(|e| PartnerError::unavailable(format!("malformed partner response: {}", e)))
    }

    async fn validate(&self, name: &str, email: &str, age: i32) -> Result<bool, PartnerError> {
        let request = ValidateRequest { name, email, age };

        let response = self
            .authorize(self.client.post(self.validate_url()))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let response = self.ensure_success(response).await?;

        let verdict = response
            .json::<ValidateResponse>()
            .await
            .map_err(|e| PartnerError::unavailable(format!("malformed partner response: {}", e)))?;

        Ok(verdict.valid)
    }

    async fn enrich(&self, id: ExampleId) -> Result<EnrichmentData, PartnerError> {
        let response = self
            .authorize(self.client.get(self.enrichment_url(id)))
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let response = self.ensure_success(response).await?;

        response
            .json::<EnrichmentData>()
            .await
            .map_err(|e| PartnerError::unavailable(format!("malformed partner response: {}", e)))
    }

    async fn notify_created(&self, id: ExampleId, email: &str) -> Result<(), PartnerError> {
        let request = NotificationRequest {
            example_id: id,
            email,
        };

        let response = self
            .authorize(self.client.post(self.notifications_url()))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        self.ensure_success(response).await?;

        Ok(())
    }
}

// ----- Partner wire types -----

#[derive(Debug, Serialize)]
struct ValidateRequest<'a> {
    name: &'a str,
    email: &'a str,
    age: i32,
}

#[derive(Debug, Deserialize)]
struct ValidateResponse {
    valid: bool,
}

#[derive(Debug, Serialize)]
struct NotificationRequest<'a> {
    example_id: ExampleId,
    email: &'a str,
}
