// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Routes module
//!
//! This module provides route configuration and handlers for the name resolver server.

pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use handlers::{classify_handler, health_handler, resolve_handler};

use crate::{
    metrics::metrics_handler,
    openapi::{OPENAPI_JSON_PATH, openapi_spec, swagger_ui},
    state::ServerState,
};

/// Create application routes
pub fn create_routes() -> Router<ServerState> {
    let ops_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler));

    let docs_routes = Router::new()
        .route(OPENAPI_JSON_PATH, get(openapi_spec))
        .route("/swagger-ui", get(swagger_ui));

    let api_routes = Router::new()
        .route("/classify", post(classify_handler))
        .route("/resolve", post(resolve_handler));

    let v1 = Router::new().nest("/v1", api_routes);

    Router::new()
        .merge(ops_routes)
        .merge(docs_routes)
        .merge(v1)
}
