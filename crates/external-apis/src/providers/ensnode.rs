// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! ENSNode indexer API
//!
//! `GET {base}/name/{name}` answering `{ "address": string, "resolver": { "address": string } }`.
//! The resolver contract address is not the name's address and is never returned.

use api_client::ApiError;
use serde::Deserialize;
use shared_types::{ChainDescriptor, DomainQuery};
use url::Url;

use super::{endpoint, non_empty};

#[derive(Debug, Deserialize)]
struct EnsNodeResponse {
    address: Option<String>,
}

/// Build the lookup URL for `query`
pub fn request_url(base: &Url, query: &DomainQuery) -> Result<Url, ApiError> {
    endpoint(base, &["name", query.ens_name()])
}

/// `address`, for the `eth` tag only
pub fn extract(body: &serde_json::Value, chain: &ChainDescriptor) -> Option<String> {
    if !chain.is_eth() {
        return None;
    }
    non_empty(EnsNodeResponse::deserialize(body).ok()?.address)
}
