// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! This module provides HTTP request handlers for the name resolver server: health
//! checks, input classification and cancellation-aware resolution.

use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use external_apis::{ResolveOptions, ResolveOutcome};
use serde::{Deserialize, Serialize};
use shared_types::{ChainDescriptor, ClassifyError, DomainQuery, Network, ResolutionResult};
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::{
    error::{ErrorResponse, ServerError},
    extractors::JsonExtractor,
    metrics,
    state::{HealthCheck, ServerState},
};

/// Health check endpoint handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Health check endpoint",
    description = "Returns the current health status of the service including version, environment and the size of the chain and provider selection tables.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthCheck),
        (status = 503, description = "Service is shutting down", body = HealthCheck)
    )
)]
pub async fn health_handler(State(state): State<ServerState>) -> impl IntoResponse {
    let health = state.health_check();
    let status = if health.is_up() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health))
}

/// Input classification request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClassifyRequest {
    /// Domain-like input as typed by a user
    #[schema(example = "alice.btc")]
    pub input: String,
    /// Network to classify for; the server default is used when absent
    #[serde(default)]
    pub network: Option<Network>,
}

/// Resolution request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResolveRequest {
    /// Domain-like input as typed by a user
    #[schema(example = "vitalik.eth")]
    pub input: String,
    /// Network to resolve on; the server default is used when absent
    #[serde(default)]
    pub network: Option<Network>,
    /// When a non-`eth` lookup finds nothing, also report the bare name's `.eth` value
    #[serde(default)]
    pub eth_fallback: bool,
    /// Fetch a profile picture for `eth` names resolved on mainnet
    #[serde(default)]
    pub include_avatar: bool,
}

/// A resolved value with presentation details
#[derive(Debug, Clone, Serialize, PartialEq, Eq, ToSchema)]
pub struct ResolvedValue {
    /// Address, handle, URL or text
    #[schema(example = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045")]
    pub value: String,
    /// Provider that answered
    #[schema(example = "local-resolver")]
    pub provider: String,
    /// Descriptor of the resolved chain tag
    pub chain: ChainDescriptor,
    /// Explorer, profile or website link for the value
    pub link: Option<String>,
    /// Avatar URL, when requested and available
    pub avatar: Option<String>,
}

/// Response from the resolve endpoint
#[derive(Debug, Clone, Serialize, PartialEq, Eq, ToSchema)]
pub struct ResolveResponse {
    /// The classified input
    pub query: DomainQuery,
    /// The resolved value, or `null` when no provider had one
    pub result: Option<ResolvedValue>,
    /// The bare name's `.eth` value, reported when the requested chain had none
    pub eth_fallback: Option<ResolutionResult>,
}

impl ResolveResponse {
    fn from_outcome(outcome: ResolveOutcome) -> Self {
        let result = outcome.resolution.map(|resolution| ResolvedValue {
            value: resolution.result.value,
            provider: resolution.result.provider_id,
            chain: resolution.chain.clone(),
            link: resolution.link,
            avatar: resolution.avatar,
        });

        Self {
            query: outcome.query,
            result,
            eth_fallback: outcome.eth_fallback,
        }
    }
}

fn classify_error_reason(error: &ClassifyError) -> &'static str {
    match error {
        ClassifyError::InvalidFormat { .. } => "invalid_format",
        ClassifyError::UnsupportedChain { .. } => "unsupported_chain",
    }
}

/// Classify an input without resolving it
///
/// Normalizes the input into its canonical name and chain tag, exactly as the resolve
/// endpoint would before querying any provider.
///
/// # Errors
///
/// Returns `ServerError::Classify` when the input is malformed or names an unknown chain.
#[utoipa::path(
    post,
    path = "/v1/classify",
    tag = "resolution",
    summary = "Classify a domain-like input",
    description = "Normalizes an input such as `alice`, `alice.btc` or `alice.eth:sol` into its canonical name, chain tag and subdomain flag without contacting any provider.",
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Input classified", body = DomainQuery),
        (status = 400, description = "Invalid format or unsupported chain", body = ErrorResponse)
    )
)]
pub async fn classify_handler(
    State(state): State<ServerState>,
    JsonExtractor(request): JsonExtractor<ClassifyRequest>,
) -> Result<Json<DomainQuery>, ServerError> {
    let network = request.network.unwrap_or_else(|| state.default_network());

    let query = state
        .resolver()
        .classify(&request.input, network)
        .inspect_err(|error| metrics::inc_classify_errors(classify_error_reason(error)))?;

    debug!(
        input = request.input,
        canonical = query.canonical_name(),
        chain = query.chain_tag(),
        "classified input"
    );
    Ok(Json(query))
}

/// Resolve an input to a chain-specific value
///
/// Queries the providers selected for the input's chain and network under one global
/// time window. "No value" is a successful response with `result: null`; only inputs
/// that cannot be classified are errors.
///
/// # Errors
///
/// Returns `ServerError::Classify` when the input is malformed or names an unknown chain,
/// and `ServerError::ShuttingDown` when the server stops before providers answer.
#[utoipa::path(
    post,
    path = "/v1/resolve",
    tag = "resolution",
    summary = "Resolve a domain-like input",
    description = "Classifies the input, picks providers from the selection table and returns the first usable value within the resolution window, with an explorer or profile link and an optional avatar.",
    request_body = ResolveRequest,
    responses(
        (status = 200, description = "Resolution finished; `result` is null when no provider had a value", body = ResolveResponse),
        (status = 400, description = "Invalid format or unsupported chain", body = ErrorResponse),
        (status = 503, description = "Service is shutting down", body = ErrorResponse)
    )
)]
pub async fn resolve_handler(
    State(state): State<ServerState>,
    JsonExtractor(request): JsonExtractor<ResolveRequest>,
) -> Result<Json<ResolveResponse>, ServerError> {
    let options = ResolveOptions {
        network: request.network.unwrap_or_else(|| state.default_network()),
        eth_fallback: request.eth_fallback,
        include_avatar: request.include_avatar,
    };

    let started = Instant::now();
    let outcome = state
        .resolver()
        .resolve_cancellable(&request.input, &options, &state.cancellation_token)
        .await
        .inspect_err(|error| metrics::inc_classify_errors(classify_error_reason(error)))?;

    if state.cancellation_token.is_cancelled() && !outcome.is_resolved() {
        return Err(ServerError::ShuttingDown);
    }

    let provider = outcome
        .resolution
        .as_ref()
        .map(|resolution| resolution.result.provider_id.as_str());
    let outcome_label = match (&outcome.resolution, &outcome.eth_fallback) {
        (Some(_), _) => "resolved",
        (None, Some(_)) => "eth_fallback",
        (None, None) => "empty",
    };
    metrics::observe_resolution(
        outcome.query.chain_tag(),
        outcome_label,
        provider,
        started.elapsed().as_secs_f64(),
    );

    info!(
        name = outcome.query.canonical_name(),
        chain = outcome.query.chain_tag(),
        network = %options.network,
        outcome = outcome_label,
        provider = provider.unwrap_or("none"),
        elapsed_ms = started.elapsed().as_millis(),
        "resolve request finished"
    );

    Ok(Json(ResolveResponse::from_outcome(outcome)))
}

#[cfg(test)]
mod tests {
    use shared_types::ChainRegistry;

    use super::*;

    #[test]
    fn resolve_request_defaults() {
        let request: ResolveRequest = serde_json::from_str(r#"{"input": "alice"}"#).unwrap();

        assert_eq!(request.input, "alice");
        assert_eq!(request.network, None);
        assert!(!request.eth_fallback);
        assert!(!request.include_avatar);
    }

    #[test]
    fn response_serializes_chain_descriptor() {
        let chains = ChainRegistry::builtin();
        let query = shared_types::classify("alice.btc", Network::Mainnet, chains).unwrap();
        let chain = chains.get("btc").unwrap();
        let outcome = ResolveOutcome {
            query,
            resolution: Some(external_apis::Resolution {
                result: ResolutionResult::new("bc1qexample", "eth-xyz", "btc"),
                chain,
                link: chain.link_for("bc1qexample"),
                avatar: None,
            }),
            eth_fallback: None,
        };

        let json = serde_json::to_value(ResolveResponse::from_outcome(outcome)).unwrap();

        assert_eq!(json["query"]["canonical_name"], "alice.eth:btc");
        assert_eq!(json["result"]["value"], "bc1qexample");
        assert_eq!(json["result"]["provider"], "eth-xyz");
        assert_eq!(json["result"]["chain"]["tag"], "btc");
        assert_eq!(json["result"]["chain"]["display_name"], "Bitcoin");
        assert_eq!(json["result"]["chain"]["kind"], "wallet");
        assert_eq!(
            json["result"]["link"],
            "https://blockstream.info/address/bc1qexample"
        );
        assert!(json["eth_fallback"].is_null());
    }

    #[test]
    fn classify_error_reasons() {
        let invalid = ClassifyError::InvalidFormat {
            input: "x".to_string(),
            reason: "too short".to_string(),
        };
        let unsupported = ClassifyError::UnsupportedChain {
            tag: "zzz".to_string(),
            supported: Vec::new(),
        };

        assert_eq!(classify_error_reason(&invalid), "invalid_format");
        assert_eq!(classify_error_reason(&unsupported), "unsupported_chain");
    }
}
