// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Self-hosted multi-chain resolver
//!
//! `GET {base}/resolve/{canonical}?network={mainnet|sepolia}&source={source}` answering
//! `{ "success": bool, "data": { "address": string } }` for every chain tag.

use api_client::ApiError;
use serde::Deserialize;
use shared_types::DomainQuery;
use url::Url;

use super::{LookupNetwork, endpoint, non_empty};

#[derive(Debug, Deserialize)]
struct LocalResponse {
    #[serde(default)]
    success: bool,
    data: Option<LocalData>,
}

#[derive(Debug, Deserialize)]
struct LocalData {
    address: Option<String>,
}

/// Build the lookup URL for `query`
pub fn request_url(
    base: &Url,
    query: &DomainQuery,
    network: LookupNetwork,
    source: &str,
) -> Result<Url, ApiError> {
    let mut url = endpoint(base, &["resolve", query.canonical_name()])?;
    url.query_pairs_mut()
        .append_pair("network", network.as_str())
        .append_pair("source", source);
    Ok(url)
}

/// `data.address`, when `success` is set
pub fn extract(body: &serde_json::Value) -> Option<String> {
    let response = LocalResponse::deserialize(body).ok()?;
    if !response.success {
        return None;
    }
    non_empty(response.data?.address)
}
