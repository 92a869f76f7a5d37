// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client seam for name resolution providers
//!
//! This crate provides the transport abstraction the resolution engine talks to, and
//! the error taxonomy for a single provider call.
//!
//! # Core Abstractions
//!
//! - **`JsonFetcher` Trait**: one GET, one decoded body. The engine is generic over it so
//!   tests can script provider behaviour without a network.
//! - **`HttpClient`**: the production implementation on top of `reqwest`.
//! - **`ApiError`**: every way a provider call can fail. The engine never lets these
//!   escape; they are logged and downgraded to "no answer".

use thiserror::Error;
use url::Url;

pub mod http;

pub use http::{HttpClient, HttpClientConfig};

/// Transport used to query name resolution providers
///
/// Implementations must treat any non-2xx status as an error; the normalizers only ever
/// see bodies from successful responses.
pub trait JsonFetcher: Send + Sync {
    /// GET `url` and decode the body as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not 2xx, or the body is not
    /// valid JSON
    fn get_json(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<serde_json::Value, ApiError>> + Send;

    /// GET `url` and return the body as text
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not 2xx
    fn get_text(&self, url: &Url) -> impl Future<Output = Result<String, ApiError>> + Send;
}

/// Errors that can occur during a single provider call
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    /// Provider answered with a non-2xx status
    #[error("Provider returned status {status}")]
    Status { status: u16 },

    /// Invalid response format
    #[error("Invalid response format: {message}")]
    InvalidResponse { message: String },

    /// Request did not complete within its time budget
    #[error("Request timeout after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidResponse {
            message: error.to_string(),
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(error: url::ParseError) -> Self {
        Self::Configuration {
            message: format!("invalid provider URL: {error}"),
        }
    }
}
