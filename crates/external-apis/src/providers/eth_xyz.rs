// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! eth.xyz text-record profiles
//!
//! `GET {template}/text-records/{label}.eth`, where the template's `{label}` placeholder
//! is replaced with the name's label (`https://{label}.eth.xyz`). The profile carries
//! text records as named fields and wallet addresses as a `wallets` list:
//!
//! ```json
//! {
//!   "success": true,
//!   "data": {
//!     "name": "Alice",
//!     "com.twitter": "alice",
//!     "wallets": [{ "name": "Bitcoin", "value": "bc1q..." }]
//!   }
//! }
//! ```

use api_client::ApiError;
use serde::Deserialize;
use shared_types::{ChainDescriptor, DomainQuery};
use url::Url;

use super::{endpoint, non_empty};

/// Placeholder substituted with the name's label in the endpoint template
pub const LABEL_PLACEHOLDER: &str = "{label}";

#[derive(Debug, Deserialize)]
struct EthXyzResponse {
    #[serde(default)]
    success: bool,
    data: Option<Profile>,
}

#[derive(Debug, Deserialize)]
struct Profile {
    name: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "com.twitter")]
    twitter: Option<String>,
    #[serde(rename = "com.github")]
    github: Option<String>,
    #[serde(default)]
    wallets: Vec<Wallet>,
}

#[derive(Debug, Deserialize)]
struct Wallet {
    name: String,
    value: Option<String>,
}

impl Profile {
    fn text_record(self, record_key: &str) -> Option<String> {
        match record_key {
            "name" => self.name,
            "description" => self.description,
            "url" => self.url,
            "com.twitter" => self.twitter,
            "com.github" => self.github,
            _ => None,
        }
    }

    fn wallet(self, chain: &ChainDescriptor) -> Option<String> {
        self.wallets
            .into_iter()
            .find(|wallet| {
                [chain.tag, chain.record_key, chain.display_name]
                    .iter()
                    .any(|candidate| wallet.name.eq_ignore_ascii_case(candidate))
            })
            .and_then(|wallet| wallet.value)
    }
}

/// Build the profile URL for `query`
pub fn request_url(template: &str, query: &DomainQuery) -> Result<Url, ApiError> {
    let label = query.label();
    let base = Url::parse(&template.replace(LABEL_PLACEHOLDER, label))?;
    endpoint(&base, &["text-records", &format!("{label}.eth")])
}

/// The text record or wallet matching `chain`
///
/// Wallets are matched case-insensitively against the chain's tag, record key and
/// display name; the first wallet that matches any of them wins.
pub fn extract(body: &serde_json::Value, chain: &ChainDescriptor) -> Option<String> {
    let response = EthXyzResponse::deserialize(body).ok()?;
    if !response.success {
        return None;
    }
    let profile = response.data?;

    let value = if chain.is_wallet() {
        profile.wallet(chain)
    } else {
        profile.text_record(chain.record_key)
    };
    non_empty(value)
}
