// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! ens.domains API
//!
//! `GET {base}/v1/domains/{name}` answering `{ "records": { "ETH": string } }`.

use api_client::ApiError;
use serde::Deserialize;
use shared_types::{ChainDescriptor, DomainQuery};
use url::Url;

use super::{endpoint, non_empty};

#[derive(Debug, Deserialize)]
struct EnsDomainsResponse {
    records: Option<Records>,
}

#[derive(Debug, Deserialize)]
struct Records {
    #[serde(rename = "ETH")]
    eth: Option<String>,
}

/// Build the lookup URL for `query`
pub fn request_url(base: &Url, query: &DomainQuery) -> Result<Url, ApiError> {
    endpoint(base, &["v1", "domains", query.ens_name()])
}

/// `records.ETH`, for the `eth` tag only
pub fn extract(body: &serde_json::Value, chain: &ChainDescriptor) -> Option<String> {
    if !chain.is_eth() {
        return None;
    }
    let response = EnsDomainsResponse::deserialize(body).ok()?;
    non_empty(response.records?.eth)
}
