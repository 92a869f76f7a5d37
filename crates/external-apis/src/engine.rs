// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Resolution engine
//!
//! This module executes a [`Selection`] for one query under a single time window.
//! Provider failures never escape: transport errors, non-2xx statuses, malformed bodies
//! and timeouts are logged and count as "no answer" for that candidate.
//!
//! # Strategies
//!
//! - **Race**: every candidate is spawned at once. The engine returns the first non-empty
//!   answer in selection order as soon as every candidate ahead of it has settled, and
//!   aborts whatever is still running when it returns.
//! - **Sequential**: candidates run one at a time and the engine stops at the first
//!   non-empty answer. Each attempt gets whatever is left of the shared window.

use std::{sync::Arc, time::Duration};

use api_client::JsonFetcher;
use shared_types::{ChainDescriptor, DomainQuery, ResolutionResult};
use tokio::{
    task::JoinSet,
    time::{Instant, timeout, timeout_at},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::{ProviderEndpoints, ResolverConfig},
    providers::{Candidate, ProviderId},
    registry::{Selection, Strategy},
};

/// Runs provider selections against a [`JsonFetcher`]
#[derive(Debug)]
pub struct ResolutionEngine<F> {
    fetcher: Arc<F>,
    endpoints: Arc<ProviderEndpoints>,
    source: Arc<str>,
    window: Duration,
}

impl<F> Clone for ResolutionEngine<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            endpoints: Arc::clone(&self.endpoints),
            source: Arc::clone(&self.source),
            window: self.window,
        }
    }
}

/// Outcome of one candidate in a race
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Pending,
    Empty,
    Value(String),
}

/// State of a race given the slots settled so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Undecided,
    Winner(usize),
    Exhausted,
}

impl<F: JsonFetcher + 'static> ResolutionEngine<F> {
    /// Create an engine using `fetcher` for every provider call
    pub fn new(fetcher: Arc<F>, config: &ResolverConfig) -> Self {
        Self {
            fetcher,
            endpoints: Arc::new(config.endpoints.clone()),
            source: Arc::from(config.source.as_str()),
            window: config.window(),
        }
    }

    /// The global window applied to each call
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Resolve `query` with the candidates and strategy of `selection`
    ///
    /// Returns `None` when no candidate produced a value within the window.
    pub async fn resolve(
        &self,
        query: &DomainQuery,
        chain: &'static ChainDescriptor,
        selection: &Selection,
    ) -> Option<ResolutionResult> {
        let deadline = Instant::now() + self.window;

        let winner = match selection.strategy {
            Strategy::Race => self.race(query, chain, &selection.candidates, deadline).await,
            Strategy::Sequential => {
                self.sequential(query, chain, &selection.candidates, deadline)
                    .await
            }
        };

        match winner {
            Some((provider, value)) => {
                debug!(
                    name = query.canonical_name(),
                    %provider,
                    "resolved"
                );
                Some(ResolutionResult::new(value, provider.as_str(), chain.tag))
            }
            None => {
                debug!(name = query.canonical_name(), "no provider answered");
                None
            }
        }
    }

    /// Same as [`Self::resolve`], but gives up as soon as `cancel` fires
    pub async fn resolve_cancellable(
        &self,
        query: &DomainQuery,
        chain: &'static ChainDescriptor,
        selection: &Selection,
        cancel: &CancellationToken,
    ) -> Option<ResolutionResult> {
        tokio::select! {
            () = cancel.cancelled() => {
                debug!(name = query.canonical_name(), "resolution cancelled");
                None
            }
            result = self.resolve(query, chain, selection) => result,
        }
    }

    async fn race(
        &self,
        query: &DomainQuery,
        chain: &'static ChainDescriptor,
        candidates: &[Candidate],
        deadline: Instant,
    ) -> Option<(ProviderId, String)> {
        let mut slots = vec![Slot::Pending; candidates.len()];
        let mut attempts = JoinSet::new();

        for (index, candidate) in candidates.iter().enumerate() {
            let Some(url) = self.request_url(candidate, query) else {
                slots[index] = Slot::Empty;
                continue;
            };
            let fetcher = Arc::clone(&self.fetcher);
            let provider = candidate.provider;
            let budget = candidate.budget(self.window);
            attempts.spawn(async move {
                let value = attempt(fetcher.as_ref(), provider, &url, chain, budget).await;
                (index, value)
            });
        }

        loop {
            match decide(&slots) {
                Decision::Winner(index) => return take_value(candidates, &mut slots, index),
                Decision::Exhausted => return None,
                Decision::Undecided => {}
            }

            match timeout_at(deadline, attempts.join_next()).await {
                Ok(Some(Ok((index, value)))) => {
                    slots[index] = value.map_or(Slot::Empty, Slot::Value);
                }
                Ok(Some(Err(error))) => {
                    warn!(error = %error, "provider task failed");
                }
                Ok(None) => break,
                Err(_) => {
                    debug!(
                        name = query.canonical_name(),
                        window_ms = self.window.as_millis(),
                        "resolution window closed"
                    );
                    break;
                }
            }
        }

        let index = slots
            .iter()
            .position(|slot| matches!(slot, Slot::Value(_)))?;
        take_value(candidates, &mut slots, index)
    }

    async fn sequential(
        &self,
        query: &DomainQuery,
        chain: &'static ChainDescriptor,
        candidates: &[Candidate],
        deadline: Instant,
    ) -> Option<(ProviderId, String)> {
        for candidate in candidates {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                debug!(
                    name = query.canonical_name(),
                    skipped = %candidate,
                    "resolution window closed"
                );
                return None;
            }

            let Some(url) = self.request_url(candidate, query) else {
                continue;
            };
            let budget = candidate.budget(remaining);
            if let Some(value) =
                attempt(self.fetcher.as_ref(), candidate.provider, &url, chain, budget).await
            {
                return Some((candidate.provider, value));
            }
        }
        None
    }

    fn request_url(&self, candidate: &Candidate, query: &DomainQuery) -> Option<Url> {
        candidate
            .request_url(&self.endpoints, query, &self.source)
            .inspect_err(|error| {
                warn!(provider = %candidate, error = %error, "could not build provider request");
            })
            .ok()
    }
}

/// The first slot in order that is not empty decides the race
fn decide(slots: &[Slot]) -> Decision {
    for (index, slot) in slots.iter().enumerate() {
        match slot {
            Slot::Pending => return Decision::Undecided,
            Slot::Value(_) => return Decision::Winner(index),
            Slot::Empty => {}
        }
    }
    Decision::Exhausted
}

fn take_value(
    candidates: &[Candidate],
    slots: &mut [Slot],
    index: usize,
) -> Option<(ProviderId, String)> {
    match std::mem::replace(&mut slots[index], Slot::Empty) {
        Slot::Value(value) => Some((candidates[index].provider, value)),
        Slot::Pending | Slot::Empty => None,
    }
}

/// One bounded provider call, normalized
async fn attempt<F: JsonFetcher>(
    fetcher: &F,
    provider: ProviderId,
    url: &Url,
    chain: &ChainDescriptor,
    budget: Duration,
) -> Option<String> {
    debug!(%provider, %url, budget_ms = budget.as_millis(), "querying provider");

    match timeout(budget, fetcher.get_json(url)).await {
        Ok(Ok(body)) => {
            let value = provider.extract(&body, chain);
            if value.is_none() {
                debug!(%provider, chain = chain.tag, "provider had no value");
            }
            value
        }
        Ok(Err(error)) => {
            warn!(%provider, error = %error, "provider request failed");
            None
        }
        Err(_) => {
            warn!(%provider, timeout_ms = budget.as_millis(), "provider request timed out");
            None
        }
    }
}
