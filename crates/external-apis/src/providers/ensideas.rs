// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! ENS Ideas API
//!
//! `GET {base}/ens/resolve/{name}` answering `{ "address": string, "avatar": string }`.
//! Only the Ethereum address is available, so non-`eth` tags never match.

use api_client::ApiError;
use serde::Deserialize;
use shared_types::{ChainDescriptor, DomainQuery};
use url::Url;

use super::{endpoint, non_empty};

#[derive(Debug, Deserialize)]
struct EnsIdeasResponse {
    address: Option<String>,
    avatar: Option<String>,
}

/// Build the lookup URL for `query`
pub fn request_url(base: &Url, query: &DomainQuery) -> Result<Url, ApiError> {
    name_url(base, query.ens_name())
}

/// Build the lookup URL for a plain ENS name
pub fn name_url(base: &Url, ens_name: &str) -> Result<Url, ApiError> {
    endpoint(base, &["ens", "resolve", ens_name])
}

/// `address`, for the `eth` tag only
pub fn extract(body: &serde_json::Value, chain: &ChainDescriptor) -> Option<String> {
    if !chain.is_eth() {
        return None;
    }
    non_empty(EnsIdeasResponse::deserialize(body).ok()?.address)
}

/// `avatar`, if present
pub fn extract_avatar(body: &serde_json::Value) -> Option<String> {
    non_empty(EnsIdeasResponse::deserialize(body).ok()?.avatar)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared_types::{ChainRegistry, Network, classify};

    use super::*;

    fn chain(tag: &str) -> &'static ChainDescriptor {
        ChainRegistry::builtin().get(tag).unwrap()
    }

    #[test]
    fn request_url_uses_ens_name() {
        let base = Url::parse("https://api.ensideas.com").unwrap();
        let query = classify("alice", Network::Mainnet, ChainRegistry::builtin()).unwrap();

        let url = request_url(&base, &query).unwrap();

        assert_eq!(url.as_str(), "https://api.ensideas.com/ens/resolve/alice.eth");
    }

    #[test]
    fn extracts_address_for_eth() {
        let body = json!({"address": "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045", "avatar": null});
        assert_eq!(
            extract(&body, chain("eth")),
            Some("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".to_string())
        );
    }

    #[test]
    fn ignores_other_chains() {
        let body = json!({"address": "0xabc"});
        assert_eq!(extract(&body, chain("btc")), None);
        assert_eq!(extract(&body, chain("x")), None);
    }

    #[test]
    fn ignores_empty_address() {
        assert_eq!(extract(&json!({"address": ""}), chain("eth")), None);
        assert_eq!(extract(&json!({}), chain("eth")), None);
    }

    #[test]
    fn extracts_avatar() {
        let body = json!({"address": "0xabc", "avatar": "https://img.example/alice.png"});
        assert_eq!(
            extract_avatar(&body),
            Some("https://img.example/alice.png".to_string())
        );
        assert_eq!(extract_avatar(&json!({"address": "0xabc"})), None);
    }
}
