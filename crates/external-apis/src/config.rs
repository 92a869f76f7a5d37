// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Resolver configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::registry::SelectionRule;

/// Default global resolution window in milliseconds
pub const DEFAULT_WINDOW_MS: u64 = 5000;

/// Default `source` tag sent to the self-hosted resolver
pub const DEFAULT_SOURCE: &str = "name-resolver";

const DEFAULT_LOCAL_RESOLVER_URL: &str = "https://api.fusionens.com";
const DEFAULT_ENSIDEAS_URL: &str = "https://api.ensideas.com";
const DEFAULT_ENS_DOMAINS_URL: &str = "https://api.ens.domains";
const DEFAULT_ENSNODE_URL: &str = "https://api.alpha.ensnode.io";
const DEFAULT_ETH_XYZ_TEMPLATE: &str = "https://{label}.eth.xyz";
const DEFAULT_AVATAR_METADATA_URL: &str = "https://metadata.ens.domains";

/// Base URLs of every provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderEndpoints {
    /// Self-hosted multi-chain resolver
    pub local_resolver: Url,
    /// ENS Ideas API
    pub ensideas: Url,
    /// ens.domains API
    pub ens_domains: Url,
    /// ENSNode indexer API
    pub ensnode: Url,
    /// eth.xyz profile URL template with a `{label}` placeholder
    pub eth_xyz_template: String,
    /// ENS metadata service used for avatars
    pub avatar_metadata: Url,
}

impl Default for ProviderEndpoints {
    #[allow(clippy::missing_panics_doc)]
    fn default() -> Self {
        let builtin = |url: &str| Url::parse(url).expect("builtin endpoint URL is valid");
        Self {
            local_resolver: builtin(DEFAULT_LOCAL_RESOLVER_URL),
            ensideas: builtin(DEFAULT_ENSIDEAS_URL),
            ens_domains: builtin(DEFAULT_ENS_DOMAINS_URL),
            ensnode: builtin(DEFAULT_ENSNODE_URL),
            eth_xyz_template: DEFAULT_ETH_XYZ_TEMPLATE.to_string(),
            avatar_metadata: builtin(DEFAULT_AVATAR_METADATA_URL),
        }
    }
}

impl ProviderEndpoints {
    /// Point every provider at the same base URL
    ///
    /// Used by tests that serve all providers from one mock server.
    pub fn all_at(base: &Url) -> Self {
        Self {
            local_resolver: base.clone(),
            ensideas: base.clone(),
            ens_domains: base.clone(),
            ensnode: base.clone(),
            eth_xyz_template: base.to_string(),
            avatar_metadata: base.clone(),
        }
    }
}

/// Configuration for a [`crate::Resolver`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Provider base URLs
    pub endpoints: ProviderEndpoints,
    /// Global resolution window per call, in milliseconds
    pub window_ms: u64,
    /// User agent sent to providers
    pub user_agent: String,
    /// `source` tag sent to the self-hosted resolver
    pub source: String,
    /// Replacement selection table; the built-in table is used when absent
    pub selection: Option<Vec<SelectionRule>>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoints: ProviderEndpoints::default(),
            window_ms: DEFAULT_WINDOW_MS,
            user_agent: api_client::HttpClientConfig::default().user_agent,
            source: DEFAULT_SOURCE.to_string(),
            selection: None,
        }
    }
}

impl ResolverConfig {
    /// The global resolution window
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}
