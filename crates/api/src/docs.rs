// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` document definition

use utoipa::OpenApi;

use crate::{
    config::Environment,
    error::ErrorResponse,
    routes::handlers::{self, ClassifyRequest, ResolveRequest, ResolveResponse, ResolvedValue},
    state::{HealthCheck, HealthStatus},
};

/// `OpenAPI` document for the name resolver service
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Name Resolver API",
        description = "Resolves ENS-style names such as `alice.eth`, `alice.btc` or `alice.eth:sol` to chain-specific addresses and profile records."
    ),
    paths(
        handlers::health_handler,
        handlers::classify_handler,
        handlers::resolve_handler,
    ),
    components(schemas(
        HealthCheck,
        HealthStatus,
        Environment,
        ClassifyRequest,
        ResolveRequest,
        ResolveResponse,
        ResolvedValue,
        ErrorResponse,
        shared_types::DomainQuery,
        shared_types::ChainDescriptor,
        shared_types::RecordKind,
        shared_types::Network,
        shared_types::ResolutionResult,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "resolution", description = "Name classification and resolution")
    )
)]
pub struct ApiDoc;
