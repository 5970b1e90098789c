// SWAPI HTTP client.
// Handles request construction, status checking, and transport error classification.

use std::time::Duration;

use reqwest::{
    Client, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::error::{PlanetError, Result};

pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api/";

/// SWAPI client bound to a base URL.
#[derive(Debug, Clone)]
pub struct SwapiClient {
    client: Client,
    base_url: String,
}

impl SwapiClient {
    /// Create a client for `base_url`. `timeout` of `None` keeps the transport default.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("planets-tui"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PlanetError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the first planets page.
    pub fn planets_url(&self) -> String {
        format!("{}/planets", self.base_url)
    }

    /// Make a GET request to an absolute URL.
    pub async fn get(&self, url: &str) -> Result<Response> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(PlanetError::from_transport)?;

        self.check_response(response).await
    }

    /// Check response status and convert failures.
    async fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(%status, "request failed");
        Err(PlanetError::Remote(format!("HTTP {}: {}", status, body)))
    }
}
