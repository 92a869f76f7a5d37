// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! This module provides error types for server operations, including the HTTP
//! response mapping for classification failures.

use std::net::SocketAddr;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use external_apis::ResolverError;
use serde::Serialize;
use shared_types::ClassifyError;
use thiserror::Error;
use utoipa::ToSchema;

/// Error types for server operations
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// The resolver could not be built from the configuration
    #[error("Resolver setup failed: {0}")]
    Resolver(#[from] ResolverError),

    /// Network binding errors
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        /// Socket address that failed to bind
        address: SocketAddr,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server startup errors
    #[error("Server startup failed: {source}")]
    Startup {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server shutdown errors
    #[error("Server shutdown failed: {source}")]
    Shutdown {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// JSON parsing errors with detailed context
    #[error("Invalid JSON request: {message}")]
    JsonError {
        /// Detailed error message
        message: String,
    },

    /// The input could not be classified
    #[error("{0}")]
    Classify(#[from] ClassifyError),

    /// The server is shutting down and no longer accepts work
    #[error("Service is shutting down")]
    ShuttingDown,
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// JSON body of an error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error code (`invalid_format`, `unsupported_chain`) or description
    #[schema(example = "unsupported_chain")]
    pub error: String,
    /// Human-readable message for classification errors
    pub message: Option<String>,
    /// Supported chain tags, for `unsupported_chain`
    pub supported: Option<Vec<String>>,
    /// HTTP status code
    #[schema(example = 400)]
    pub status: u16,
}

/// JSON body for a classification failure
fn classify_error_body(error: &ClassifyError) -> serde_json::Value {
    match error {
        ClassifyError::InvalidFormat { input, reason } => serde_json::json!({
            "error": "invalid_format",
            "message": error.to_string(),
            "details": {
                "input": input,
                "reason": reason
            }
        }),
        ClassifyError::UnsupportedChain { tag, supported } => serde_json::json!({
            "error": "unsupported_chain",
            "message": error.to_string(),
            "details": {
                "tag": tag
            },
            "supported": supported
        }),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, json_body) = match &self {
            ServerError::Config { .. }
            | ServerError::Resolver(..)
            | ServerError::Bind { .. }
            | ServerError::Startup { .. }
            | ServerError::Shutdown { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "error": self.to_string(),
                    "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16()
                }),
            ),
            ServerError::ShuttingDown => (
                StatusCode::SERVICE_UNAVAILABLE,
                serde_json::json!({
                    "error": self.to_string(),
                    "status": StatusCode::SERVICE_UNAVAILABLE.as_u16()
                }),
            ),
            ServerError::JsonError { .. } => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": self.to_string(),
                    "status": StatusCode::BAD_REQUEST.as_u16()
                }),
            ),
            ServerError::Classify(classify_err) => {
                let mut json_response = classify_error_body(classify_err);
                json_response["status"] = StatusCode::BAD_REQUEST.as_u16().into();
                (StatusCode::BAD_REQUEST, json_response)
            }
        };

        let body = Json(json_body);
        (status, body).into_response()
    }
}
