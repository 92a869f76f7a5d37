// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Name resolution providers and the resolution engine
//!
//! This crate turns a classified name into a chain-specific value by querying external
//! name resolution providers under a time budget.
//!
//! # Architecture
//!
//! - **Providers**: [`providers`] - request builders and response normalizers, one module
//!   per provider, dispatched through the closed [`ProviderId`] set
//! - **Selection Policy**: [`registry::ProviderRegistry`] - ordered rule table deciding
//!   which providers to query and whether to race them or try them in turn
//! - **Engine**: [`engine::ResolutionEngine`] - runs a selection under one global window
//!   and absorbs every provider failure
//! - **Facade**: [`resolver::Resolver`] - classification, selection, resolution, links and
//!   avatars behind a single call
//!
//! # Features
//!
//! - **Bounded Waits**: every call settles within the configured window; late answers are
//!   aborted, never observed
//! - **Cancellation**: callers can abandon a resolution with a `CancellationToken`
//! - **Stale Result Detection**: [`generation::ResolutionGeneration`] lets callers discard
//!   answers to superseded requests
//! - **Configurable Policy**: the selection table is plain data and can be replaced
//! - **Testing Support**: the engine is generic over [`api_client::JsonFetcher`]

pub mod avatar;
pub mod config;
pub mod engine;
pub mod generation;
pub mod providers;
pub mod registry;
pub mod resolver;

pub use avatar::AvatarLookup;
pub use config::{ProviderEndpoints, ResolverConfig};
pub use engine::ResolutionEngine;
pub use generation::{ResolutionGeneration, Ticket};
pub use providers::{Candidate, LookupNetwork, ProviderId};
pub use registry::{
    ChainMatch, ProviderRegistry, RegistryError, RuleCondition, Selection, SelectionRule, Strategy,
};
pub use resolver::{Resolution, ResolveOptions, ResolveOutcome, Resolver, ResolverError};
