// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Resolver facade
//!
//! [`Resolver`] ties classification, provider selection, the engine and the avatar
//! lookup together behind one call. All behaviour switches are passed per call through
//! [`ResolveOptions`]; the resolver itself holds no mutable state.

use std::{sync::Arc, time::Instant};

use api_client::{ApiError, HttpClient, HttpClientConfig, JsonFetcher};
use serde::Serialize;
use shared_types::{
    ChainDescriptor, ChainRegistry, ClassifyError, DomainQuery, Network, ResolutionResult,
    classify,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    avatar::AvatarLookup,
    config::ResolverConfig,
    engine::ResolutionEngine,
    registry::{ProviderRegistry, RegistryError},
};

/// Errors raised while building a [`Resolver`]
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// The selection table is invalid or incomplete
    #[error("Invalid selection table: {0}")]
    Registry(#[from] RegistryError),

    /// The provider HTTP client could not be built
    #[error("Provider client error: {0}")]
    Client(#[from] ApiError),

    /// A configuration value is out of range
    #[error("Invalid resolver configuration: {0}")]
    Configuration(String),
}

/// Per-call resolution options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Network to resolve on
    pub network: Network,
    /// When a non-`eth` lookup finds nothing, also look up the bare name's `.eth` value
    pub eth_fallback: bool,
    /// Fetch a profile picture for resolved `eth` names on mainnet
    pub include_avatar: bool,
}

/// A successful resolution with presentation details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The normalized value and the provider that produced it
    pub result: ResolutionResult,
    /// Descriptor of the resolved chain tag
    pub chain: &'static ChainDescriptor,
    /// Outbound link for the value (explorer, profile or website)
    pub link: Option<String>,
    /// Avatar URL, when requested and available
    pub avatar: Option<String>,
}

/// Everything learned about one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveOutcome {
    /// The classified input
    pub query: DomainQuery,
    /// The resolved value, if any provider answered
    pub resolution: Option<Resolution>,
    /// The bare name's `.eth` value, reported when the requested chain had no value
    pub eth_fallback: Option<ResolutionResult>,
}

impl ResolveOutcome {
    /// Whether a value was resolved for the requested chain
    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }
}

/// Multi-chain name resolver
#[derive(Debug)]
pub struct Resolver<F = HttpClient> {
    chains: &'static ChainRegistry,
    registry: ProviderRegistry,
    engine: ResolutionEngine<F>,
    avatars: AvatarLookup<F>,
}

impl Resolver<HttpClient> {
    /// Create a resolver that talks to providers over HTTP
    pub fn from_config(config: ResolverConfig) -> Result<Self, ResolverError> {
        let client = HttpClient::new(&HttpClientConfig {
            user_agent: config.user_agent.clone(),
            ..Default::default()
        })?;
        Self::with_fetcher(config, client)
    }
}

impl<F: JsonFetcher + 'static> Resolver<F> {
    /// Create a resolver on top of an arbitrary transport
    pub fn with_fetcher(config: ResolverConfig, fetcher: F) -> Result<Self, ResolverError> {
        if config.window_ms == 0 {
            return Err(ResolverError::Configuration(
                "resolution window must be greater than 0".to_string(),
            ));
        }

        let chains = ChainRegistry::builtin();
        let registry = match config.selection.clone() {
            Some(rules) => ProviderRegistry::from_rules(rules)?,
            None => ProviderRegistry::default(),
        };
        registry.validate(chains)?;

        let fetcher = Arc::new(fetcher);
        let avatars = AvatarLookup::new(Arc::clone(&fetcher), &config.endpoints, config.window());
        let engine = ResolutionEngine::new(fetcher, &config);

        info!(
            window_ms = config.window_ms,
            rules = registry.rules().len(),
            chains = chains.len(),
            "resolver ready"
        );

        Ok(Self {
            chains,
            registry,
            engine,
            avatars,
        })
    }

    /// The chain table used for classification
    pub fn chains(&self) -> &'static ChainRegistry {
        self.chains
    }

    /// The provider selection table
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Classify `raw` without resolving it
    pub fn classify(&self, raw: &str, network: Network) -> Result<DomainQuery, ClassifyError> {
        classify(raw, network, self.chains)
    }

    /// Classify and resolve `raw`
    ///
    /// Only classification failures are errors; "no provider had a value" is an
    /// [`ResolveOutcome`] without a resolution.
    pub async fn resolve(
        &self,
        raw: &str,
        options: &ResolveOptions,
    ) -> Result<ResolveOutcome, ClassifyError> {
        self.resolve_cancellable(raw, options, &CancellationToken::new())
            .await
    }

    /// Same as [`Self::resolve`], but stops waiting on providers once `cancel` fires
    pub async fn resolve_cancellable(
        &self,
        raw: &str,
        options: &ResolveOptions,
        cancel: &CancellationToken,
    ) -> Result<ResolveOutcome, ClassifyError> {
        let query = self.classify(raw, options.network)?;
        let started = Instant::now();

        let resolution = match self.resolve_query(&query, cancel).await {
            Some((chain, result)) => Some(self.present(&query, chain, result, options).await),
            None => None,
        };

        let eth_fallback = if resolution.is_none() && options.eth_fallback && !query.is_eth() {
            self.resolve_eth_variant(&query, cancel).await
        } else {
            None
        };

        debug!(
            name = query.canonical_name(),
            resolved = resolution.is_some(),
            eth_fallback = eth_fallback.is_some(),
            elapsed_ms = started.elapsed().as_millis(),
            "resolution finished"
        );

        Ok(ResolveOutcome {
            query,
            resolution,
            eth_fallback,
        })
    }

    async fn resolve_query(
        &self,
        query: &DomainQuery,
        cancel: &CancellationToken,
    ) -> Option<(&'static ChainDescriptor, ResolutionResult)> {
        let chain = self.chains.get(query.chain_tag())?;
        let selection = self
            .registry
            .select(query.chain_tag(), query.network(), query.is_eth_subdomain())
            .inspect_err(|error| debug!(error = %error, "no providers selected"))
            .ok()?;

        self.engine
            .resolve_cancellable(query, chain, selection, cancel)
            .await
            .map(|result| (chain, result))
    }

    async fn resolve_eth_variant(
        &self,
        query: &DomainQuery,
        cancel: &CancellationToken,
    ) -> Option<ResolutionResult> {
        let variant = self
            .classify(&query.eth_variant(), query.network())
            .inspect_err(|error| debug!(error = %error, "no .eth variant to fall back to"))
            .ok()?;

        debug!(
            name = query.canonical_name(),
            fallback = variant.canonical_name(),
            "trying .eth fallback"
        );
        self.resolve_query(&variant, cancel)
            .await
            .map(|(_, result)| result)
    }

    async fn present(
        &self,
        query: &DomainQuery,
        chain: &'static ChainDescriptor,
        result: ResolutionResult,
        options: &ResolveOptions,
    ) -> Resolution {
        let link = chain.link_for(&result.value);

        let avatar = if options.include_avatar && chain.is_eth() && query.network().is_mainnet()
        {
            self.avatars.fetch(query.ens_name(), &result.value).await
        } else {
            None
        };

        Resolution {
            result,
            chain,
            link,
            avatar,
        }
    }
}
