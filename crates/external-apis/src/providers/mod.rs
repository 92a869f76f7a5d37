// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Name resolution providers
//!
//! Each provider module knows how to build its request URL and how to normalize its
//! response body into a single scalar. [`ProviderId`] is the closed set of providers and
//! dispatches to the right module; [`Candidate`] is one provider as it appears in a
//! selection rule.

use std::{fmt, time::Duration};

use api_client::ApiError;
use serde::{Deserialize, Serialize};
use shared_types::{ChainDescriptor, DomainQuery, Network};
use url::Url;

use crate::config::ProviderEndpoints;

pub mod ens_domains;
pub mod ensideas;
pub mod ensnode;
pub mod eth_xyz;
pub mod local;

/// Identifier of a name resolution provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderId {
    /// Self-hosted multi-chain resolver
    #[serde(rename = "local-resolver")]
    LocalResolver,
    /// ENS Ideas public API
    #[serde(rename = "ensideas")]
    EnsIdeas,
    /// ens.domains public API
    #[serde(rename = "ens-domains")]
    EnsDomains,
    /// ENSNode indexer API
    #[serde(rename = "ensnode")]
    EnsNode,
    /// eth.xyz text-record profiles
    #[serde(rename = "eth-xyz")]
    EthXyz,
}

impl ProviderId {
    /// All providers
    pub const ALL: [Self; 5] = [
        Self::LocalResolver,
        Self::EnsIdeas,
        Self::EnsDomains,
        Self::EnsNode,
        Self::EthXyz,
    ];

    /// Stable identifier reported in resolution results
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LocalResolver => "local-resolver",
            Self::EnsIdeas => "ensideas",
            Self::EnsDomains => "ens-domains",
            Self::EnsNode => "ensnode",
            Self::EthXyz => "eth-xyz",
        }
    }

    /// Normalize a provider response body into a single value
    ///
    /// Returns `None` when the body does not carry a usable value for `chain`.
    pub fn extract(self, body: &serde_json::Value, chain: &ChainDescriptor) -> Option<String> {
        match self {
            Self::LocalResolver => local::extract(body),
            Self::EnsIdeas => ensideas::extract(body, chain),
            Self::EnsDomains => ens_domains::extract(body, chain),
            Self::EnsNode => ensnode::extract(body, chain),
            Self::EthXyz => eth_xyz::extract(body, chain),
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Network parameter understood by the self-hosted resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupNetwork {
    /// Ethereum mainnet
    Mainnet,
    /// Sepolia testnet
    Sepolia,
}

impl LookupNetwork {
    /// Query parameter value
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Sepolia => "sepolia",
        }
    }
}

impl From<Network> for LookupNetwork {
    fn from(network: Network) -> Self {
        match network {
            Network::Mainnet => Self::Mainnet,
            Network::Testnet => Self::Sepolia,
        }
    }
}

/// One provider entry in a selection rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Provider to query
    pub provider: ProviderId,
    /// Network override for the self-hosted resolver; defaults to the query's network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<LookupNetwork>,
    /// Per-candidate timeout; always capped by the remaining resolution window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Candidate {
    /// Candidate for `provider` with no overrides
    pub const fn new(provider: ProviderId) -> Self {
        Self {
            provider,
            network: None,
            timeout_ms: None,
        }
    }

    /// Self-hosted resolver candidate pinned to `network`
    pub const fn local(network: LookupNetwork) -> Self {
        Self {
            provider: ProviderId::LocalResolver,
            network: Some(network),
            timeout_ms: None,
        }
    }

    /// Set the per-candidate timeout
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Time this candidate may spend given what is left of the window
    pub fn budget(&self, remaining: Duration) -> Duration {
        self.timeout_ms
            .map_or(remaining, |ms| Duration::from_millis(ms).min(remaining))
    }

    /// Build the request URL for `query`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when the configured endpoint cannot carry a path
    pub fn request_url(
        &self,
        endpoints: &ProviderEndpoints,
        query: &DomainQuery,
        source: &str,
    ) -> Result<Url, ApiError> {
        match self.provider {
            ProviderId::LocalResolver => {
                let network = self
                    .network
                    .unwrap_or_else(|| LookupNetwork::from(query.network()));
                local::request_url(&endpoints.local_resolver, query, network, source)
            }
            ProviderId::EnsIdeas => ensideas::request_url(&endpoints.ensideas, query),
            ProviderId::EnsDomains => ens_domains::request_url(&endpoints.ens_domains, query),
            ProviderId::EnsNode => ensnode::request_url(&endpoints.ensnode, query),
            ProviderId::EthXyz => eth_xyz::request_url(&endpoints.eth_xyz_template, query),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.network {
            Some(network) => write!(f, "{}({})", self.provider, network.as_str()),
            None => write!(f, "{}", self.provider),
        }
    }
}

/// Append path segments to a base URL, percent-encoding each segment
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ApiError::Configuration {
            message: format!("endpoint '{base}' cannot be a base URL"),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Treat empty and whitespace-only strings as absent
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
