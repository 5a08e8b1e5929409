/*
[INPUT]:  HTTP configuration (base URL, connect timeout, request timeout)
[OUTPUT]: Configured reqwest client ready for task API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
[UPDATE]: 2026-10-12 Single base URL; status-only send helper for mutations
[UPDATE]: 2026-10-19 Default to a finite request timeout
*/

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::http::{Result, TaskdeskError};

/// Default location of the task API
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Whole-request timeout used unless configured otherwise
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub connect_timeout: Duration,
    /// Whole-request timeout. `None` waits for the server indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

/// HTTP client for the task/comment REST API
#[derive(Debug, Clone)]
pub struct TaskdeskClient {
    http_client: Client,
    base_url: Url,
}

impl TaskdeskClient {
    /// Create a new client against [`DEFAULT_BASE_URL`]
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a new client with custom configuration and base URL
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let mut builder = Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an endpoint relative to the base URL
    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        debug!(%method, %url, "building request");
        Ok(self.http_client.request(method, url))
    }

    /// Send and decode a JSON body from a 2xx response
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send_checked(builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send and keep only the status; success bodies are not inspected
    pub(crate) async fn send_status(&self, builder: RequestBuilder) -> Result<()> {
        self.send_checked(builder).await?;
        Ok(())
    }

    async fn send_checked(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "response received");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(TaskdeskError::from_response_body(status, &body))
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(TaskdeskError::Config(format!("base url cannot be a base: {raw}")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
