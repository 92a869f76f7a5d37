// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics module
//!
//! Provides global metrics using the default Prometheus registry via macros and
//! an Axum-compatible metrics handler.

use std::sync::LazyLock;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use prometheus::{
    Encoder, HistogramVec, IntCounterVec, TextEncoder, register_histogram_vec,
    register_int_counter_vec,
};
use tracing::error;

/// Total number of resolve requests, labeled by chain tag and outcome.
pub static RESOLUTIONS_BY_CHAIN: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "name_resolver_resolutions_total",
        "Total number of resolve requests, labeled by chain tag and outcome",
        &["chain", "outcome"]
    )
    .expect("Failed to create name_resolver_resolutions_total counter vec")
});

/// Number of resolutions won by each provider.
pub static PROVIDER_WINS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "name_resolver_provider_wins_total",
        "Number of resolutions answered by each provider",
        &["provider"]
    )
    .expect("Failed to create name_resolver_provider_wins_total counter vec")
});

/// Inputs rejected by the classifier, labeled by reason.
pub static CLASSIFY_ERRORS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "name_resolver_classify_errors_total",
        "Inputs rejected by the classifier, labeled by reason",
        &["reason"]
    )
    .expect("Failed to create name_resolver_classify_errors_total counter vec")
});

/// Histogram for end-to-end resolution durations in seconds.
pub static RESOLUTION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "name_resolver_resolution_duration",
        "End-to-end resolution durations in seconds",
        &["chain", "outcome"],
        vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to create resolution duration histogram")
});

/// Record a finished resolution
///
/// # Arguments
/// * `chain` - The classified chain tag
/// * `outcome` - `resolved`, `eth_fallback` or `empty`
/// * `provider` - The provider that answered, if any
/// * `duration_secs` - Time spent resolving, in seconds
pub fn observe_resolution(chain: &str, outcome: &str, provider: Option<&str>, duration_secs: f64) {
    RESOLUTIONS_BY_CHAIN
        .with_label_values(&[chain, outcome])
        .inc();
    RESOLUTION_DURATION
        .with_label_values(&[chain, outcome])
        .observe(duration_secs);
    if let Some(provider) = provider {
        PROVIDER_WINS.with_label_values(&[provider]).inc();
    }
}

/// Record a classification failure
///
/// # Arguments
/// * `reason` - `invalid_format` or `unsupported_chain`
pub fn inc_classify_errors(reason: &str) {
    CLASSIFY_ERRORS.with_label_values(&[reason]).inc();
}

/// Axum handler that exports metrics in Prometheus text format
pub async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %e, "failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    match String::from_utf8(buffer) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, encoder.format_type().to_string())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "metrics buffer is not valid UTF-8");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
