// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Name Resolver API Server Implementation
//!
//! This crate provides the HTTP service in front of the multi-chain resolver, built with
//! Axum and designed for production use with hierarchical configuration, request tracing
//! and graceful shutdown.
//!
//! # Module Structure
//!
//! - [`config`]: Server and resolver configuration with hierarchical loading
//! - [`error`]: Error types and HTTP response mapping
//! - [`state`]: Shared application state with cancellation token support
//! - [`server`]: Server lifecycle, middleware stack and coordinated shutdown
//! - [`routes`]: Route configuration and the classify/resolve handlers
//! - [`extractors`]: JSON extractor with descriptive rejection messages
//! - [`metrics`]: Prometheus counters and histograms for resolutions
//! - [`openapi`]: `OpenAPI` specification and Swagger UI endpoints
//!
//! # Key Features
//!
//! - **Bounded Latency**: every resolve request settles within the configured window
//! - **Graceful Shutdown**: shutdown cancels in-flight resolutions through a shared token
//! - **Configurable Policy**: provider endpoints and the selection table come from config
//! - **Observability**: request-id spans, structured logs and Prometheus metrics

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod metrics;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Environment, ResolverSettings, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{Server, ShutdownConfig};
pub use state::{HealthCheck, ServerState};
