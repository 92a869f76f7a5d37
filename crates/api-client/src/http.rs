// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `reqwest`-backed provider transport

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::{ApiError, JsonFetcher};

const DEFAULT_USER_AGENT: &str = concat!("name-resolver/", env!("CARGO_PKG_VERSION"));
const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// Configuration for the provider HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent sent with every provider request
    pub user_agent: String,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Hard upper bound on a single request, independent of the resolution window
    pub request_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECONDS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        }
    }
}

/// HTTP client used to query name resolution providers
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new provider HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the user agent is empty or the underlying client cannot be built
    pub fn new(config: &HttpClientConfig) -> Result<Self, ApiError> {
        if config.user_agent.trim().is_empty() {
            return Err(ApiError::Configuration {
                message: "user agent cannot be empty".to_string(),
            });
        }

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client })
    }

    async fn get(&self, url: &Url) -> Result<reqwest::Response, ApiError> {
        debug!(%url, "sending provider request");

        let response = self
            .client
            .get(url.clone())
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, status = status.as_u16(), "provider returned non-success status");
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

impl JsonFetcher for HttpClient {
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, ApiError> {
        let body = self.get(url).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get_text(&self, url: &Url) -> Result<String, ApiError> {
        Ok(self.get(url).await?.text().await?)
    }
}
