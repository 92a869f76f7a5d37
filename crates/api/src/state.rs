// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! This module provides shared application state for the name resolver server,
//! including configuration, the resolver and coordinated cancellation.

use std::sync::Arc;

use external_apis::Resolver;
use serde::{Deserialize, Serialize};
use shared_types::Network;
use tokio_util::sync::CancellationToken;
use utoipa::ToSchema;

use crate::config::{Environment, ServerConfig};

/// Shared application state with cancellation token support
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    config: ServerConfig,
    /// Multi-chain resolver shared by all requests
    resolver: Arc<Resolver>,
    /// Cancellation token for coordinated shutdown
    pub cancellation_token: CancellationToken,
}

impl ServerState {
    /// Create new server state
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `resolver` - Resolver used by the request handlers
    /// * `cancellation_token` - Token for coordinated cancellation
    pub fn new(
        config: ServerConfig,
        resolver: Arc<Resolver>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            resolver,
            cancellation_token,
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The shared resolver
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Network used when a request does not name one
    pub fn default_network(&self) -> Network {
        self.config.resolver.default_network
    }

    /// Report the service health
    ///
    /// The service is down once shutdown has started.
    pub fn health_check(&self) -> HealthCheck {
        let status = if self.cancellation_token.is_cancelled() {
            HealthStatus::Down {
                reason: Box::from("shutting down"),
            }
        } else {
            HealthStatus::Up
        };

        HealthCheck {
            status,
            version: Box::from(env!("CARGO_PKG_VERSION")),
            environment: self.config.environment,
            timestamp: chrono::Utc::now().to_rfc3339(),
            supported_chains: self.resolver.chains().len(),
            selection_rules: self.resolver.registry().rules().len(),
            resolution_window_ms: self.config.resolver.window_ms.value(),
        }
    }
}

/// Health status of the service
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum HealthStatus {
    /// Service is fully operational and responding normally
    Up,

    /// Service is not accepting work
    Down {
        /// Human-readable explanation of why the service is down
        reason: Box<str>,
    },
}

/// Health check status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    /// Service status
    pub status: HealthStatus,
    /// Service version
    #[schema(value_type = String)]
    pub version: Box<str>,
    /// Environment
    pub environment: Environment,
    /// Timestamp
    pub timestamp: String,
    /// Number of chain tags the classifier accepts
    pub supported_chains: usize,
    /// Number of rows in the provider selection table
    pub selection_rules: usize,
    /// Global resolution window per request
    pub resolution_window_ms: u64,
}

impl HealthCheck {
    /// Whether the service is up
    pub fn is_up(&self) -> bool {
        self.status == HealthStatus::Up
    }
}
