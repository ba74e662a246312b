//! HTTP client for the generative-language API, built on reqwest

use crate::config::Credential;
use crate::provider::wire::{GenerateRequest, GenerateResponse};
use crate::provider::{GenerativeClient, ProviderError, ProviderResult};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Maximum response size (10MB)
const MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

/// Default user agent
const USER_AGENT: &str = concat!("tutor-core/", env!("CARGO_PKG_VERSION"));

/// Default API endpoint
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Shared HTTP client with connection pooling
#[derive(Clone)]
pub struct GeminiClient {
    client: Arc<Client>,
    base_url: String,
    credential: Credential,
    max_response_size: u64,
}

impl GeminiClient {
    /// Create a new client with default settings
    pub fn new(credential: Credential) -> ProviderResult<Self> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|e| ProviderError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: DEFAULT_BASE_URL.to_string(),
            credential,
            max_response_size: MAX_RESPONSE_SIZE,
        })
    }

    /// Override the API endpoint, used by tests against a local mock server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn submit(&self, request: &GenerateRequest) -> ProviderResult<GenerateResponse> {
        let request_id = Uuid::new_v4();
        let url = self.build_url(&request.model);

        info!(
            model = %request.model,
            request_id = %request_id,
            "submitting generateContent request"
        );
        debug!(url = %url, "request URL");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.credential.key().expose_secret())
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_response_size {
                return Err(ProviderError::ParseError(format!(
                    "Response size {} exceeds maximum {} [request_id: {}]",
                    content_length, self.max_response_size, request_id
                )));
            }
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = ProviderError::from_status(status.as_u16(), Some(&body));
            warn!(
                status = status.as_u16(),
                request_id = %request_id,
                transient = error.is_transient(),
                "provider returned error status"
            );
            return Err(error);
        }

        let body = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::ParseError(format!(
                "Unexpected response schema: {} [request_id: {}]",
                e, request_id
            ))
        })?;

        debug!(
            request_id = %request_id,
            candidates = parsed.candidates.len(),
            "request completed"
        );

        Ok(parsed)
    }
}
