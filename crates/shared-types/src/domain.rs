// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Domain input classification
//!
//! Turns raw user input such as `alice`, `alice.eth`, `alice.btc` or `alice.eth:sol`
//! into a [`DomainQuery`]: the canonical name sent to providers, the chain tag that
//! selects the record, and whether the name is an ENS subdomain.
//!
//! Two input formats are accepted:
//!
//! - old format `name.chain`, where the last label is the chain tag. Anything other than
//!   `.eth` is rewritten internally to the new format (`alice.btc` → `alice.eth:btc`).
//! - new format `name.eth:chain`, where the suffix after the last `:` is the chain tag.
//!
//! Classification is pure: it never touches the network.
//!
//! ```rust
//! use shared_types::{ChainRegistry, Network, classify};
//!
//! let query = classify("alice.btc", Network::Mainnet, ChainRegistry::builtin()).unwrap();
//! assert_eq!(query.canonical_name(), "alice.eth:btc");
//! assert_eq!(query.chain_tag(), "btc");
//! assert_eq!(query.ens_name(), "alice.eth");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    chains::{ChainRegistry, ETH_TAG},
    network::Network,
};

/// Inputs of this many characters or fewer are rejected
const MIN_INPUT_LEN: usize = 3;

/// Characters that can never appear in a domain input
const DISALLOWED_CHARS: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '+', '=', '[', ']', '{', '}', ';', '\'',
    '"', '\\', '|', ',', '<', '>', '/', '?',
];

// Compiled once, patterns are static
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)*$",
    )
    .expect("domain name regex is valid")
});
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+$").expect("chain tag regex is valid"));

/// Errors returned when input cannot be classified
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// The input is not a syntactically valid domain
    #[error("invalid domain name format: {reason}")]
    InvalidFormat {
        /// The offending input
        input: String,
        /// Why the input was rejected
        reason: String,
    },

    /// The chain tag is not in the chain table
    #[error("unsupported chain tag '.{tag}'. Supported: {}", display_tags(.supported))]
    UnsupportedChain {
        /// The unknown tag
        tag: String,
        /// All supported tags, in table order
        supported: Vec<String>,
    },
}

impl ClassifyError {
    fn invalid(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

fn display_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!(".{tag}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A classified resolution request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DomainQuery {
    raw_input: String,
    canonical_name: String,
    chain_tag: String,
    is_eth_subdomain: bool,
    network: Network,
}

impl DomainQuery {
    /// The trimmed input as the user typed it
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Canonical name: `alice.eth` for Ethereum, `alice.eth:btc` for other tags
    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    /// The chain tag selecting the record
    pub fn chain_tag(&self) -> &str {
        &self.chain_tag
    }

    /// Whether the ENS name has more than one label before `.eth`
    pub fn is_eth_subdomain(&self) -> bool {
        self.is_eth_subdomain
    }

    /// The network this query targets
    pub fn network(&self) -> Network {
        self.network
    }

    /// Whether the chain tag is `eth`
    pub fn is_eth(&self) -> bool {
        self.chain_tag == ETH_TAG
    }

    /// The ENS name without any `:chain` suffix
    pub fn ens_name(&self) -> &str {
        self.canonical_name
            .rsplit_once(':')
            .map_or(self.canonical_name.as_str(), |(name, _)| name)
    }

    /// The ENS name without its trailing `.eth`
    pub fn label(&self) -> &str {
        let ens_name = self.ens_name();
        ens_name
            .strip_suffix(".eth")
            .unwrap_or(ens_name)
    }

    /// The bare name's `.eth` variant, used for informational fallback lookups
    pub fn eth_variant(&self) -> String {
        format!("{}.eth", self.label())
    }
}

/// Classify raw user input into a [`DomainQuery`]
///
/// # Errors
///
/// Returns [`ClassifyError::InvalidFormat`] when the input fails the syntax rules and
/// [`ClassifyError::UnsupportedChain`] when the chain tag is not in `chains`.
pub fn classify(
    raw: &str,
    network: Network,
    chains: &ChainRegistry,
) -> Result<DomainQuery, ClassifyError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ClassifyError::invalid(trimmed, "input is empty"));
    }
    if trimmed.chars().count() <= MIN_INPUT_LEN {
        return Err(ClassifyError::invalid(
            trimmed,
            format!("input must be longer than {MIN_INPUT_LEN} characters"),
        ));
    }
    if let Some(c) = trimmed.chars().find(|c| DISALLOWED_CHARS.contains(c)) {
        return Err(ClassifyError::invalid(
            trimmed,
            format!("character '{c}' is not allowed"),
        ));
    }

    let input = with_default_tld(&trimmed.to_lowercase());

    let (name, tag, canonical_name) = match input.rsplit_once(':') {
        Some((name, tag)) => (name.to_string(), tag.to_string(), input.clone()),
        None => {
            let (name_without_tld, tag) = input
                .rsplit_once('.')
                .ok_or_else(|| ClassifyError::invalid(trimmed, "missing chain tag"))?;
            if tag == ETH_TAG {
                (input.clone(), tag.to_string(), input.clone())
            } else {
                (
                    format!("{name_without_tld}.{ETH_TAG}"),
                    tag.to_string(),
                    format!("{name_without_tld}.{ETH_TAG}:{tag}"),
                )
            }
        }
    };

    if !TAG_PATTERN.is_match(&tag) {
        return Err(ClassifyError::invalid(
            trimmed,
            format!("chain tag '{tag}' must be alphanumeric"),
        ));
    }
    if !NAME_PATTERN.is_match(&name) {
        return Err(ClassifyError::invalid(
            trimmed,
            format!("'{name}' is not a valid domain name"),
        ));
    }

    if !chains.contains(&tag) {
        return Err(ClassifyError::UnsupportedChain {
            tag,
            supported: chains.tags().into_iter().map(str::to_string).collect(),
        });
    }

    Ok(DomainQuery {
        raw_input: trimmed.to_string(),
        is_eth_subdomain: is_eth_subdomain(&name),
        canonical_name,
        chain_tag: tag,
        network,
    })
}

/// Bare names default to Ethereum; `alice:btc` becomes `alice.eth:btc`
fn with_default_tld(input: &str) -> String {
    if input.contains('.') {
        return input.to_string();
    }
    match input.rsplit_once(':') {
        Some((name, tag)) => format!("{name}.{ETH_TAG}:{tag}"),
        None => format!("{input}.{ETH_TAG}"),
    }
}

fn is_eth_subdomain(ens_name: &str) -> bool {
    ens_name
        .strip_suffix(".eth")
        .is_some_and(|base| base.contains('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mainnet(raw: &str) -> Result<DomainQuery, ClassifyError> {
        classify(raw, Network::Mainnet, ChainRegistry::builtin())
    }

    #[test]
    fn bare_name_defaults_to_eth() {
        let query = mainnet("alice").unwrap();
        assert_eq!(query.canonical_name(), "alice.eth");
        assert_eq!(query.chain_tag(), "eth");
        assert_eq!(query.raw_input(), "alice");
        assert!(query.is_eth());
        assert!(!query.is_eth_subdomain());
    }

    #[test]
    fn bare_names_get_eth_appended() {
        for name in ["alice", "vitalik", "nick-johnson", "1234"] {
            let query = mainnet(name).unwrap();
            assert_eq!(query.canonical_name(), format!("{name}.eth"));
            assert_eq!(query.chain_tag(), "eth");
        }
    }

    #[test]
    fn bare_name_with_chain_suffix() {
        let query = mainnet("alice:btc").unwrap();
        assert_eq!(query.canonical_name(), "alice.eth:btc");
        assert_eq!(query.chain_tag(), "btc");
    }

    #[test]
    fn old_format_is_rewritten() {
        let query = mainnet("alice.btc").unwrap();
        assert_eq!(query.canonical_name(), "alice.eth:btc");
        assert_eq!(query.chain_tag(), "btc");
        assert_eq!(query.ens_name(), "alice.eth");
        assert_eq!(query.label(), "alice");
        assert!(!query.is_eth());
    }

    #[test]
    fn new_format_is_kept() {
        let query = mainnet("alice.eth:sol").unwrap();
        assert_eq!(query.canonical_name(), "alice.eth:sol");
        assert_eq!(query.chain_tag(), "sol");
        assert_eq!(query.ens_name(), "alice.eth");
    }

    #[test]
    fn every_supported_tag_is_detected() {
        for tag in ChainRegistry::builtin().tags() {
            let query = mainnet(&format!("alice.{tag}")).unwrap();
            assert_eq!(query.chain_tag(), tag, "tag {tag} should be detected");

            let query = mainnet(&format!("alice.eth:{tag}")).unwrap();
            assert_eq!(query.chain_tag(), tag, "tag {tag} should be detected");
        }
    }

    #[test]
    fn classification_is_idempotent_on_canonical_output() {
        for tag in ChainRegistry::builtin().tags() {
            let first = mainnet(&format!("alice.{tag}")).unwrap();
            let second = mainnet(first.canonical_name()).unwrap();
            let third = mainnet(second.canonical_name()).unwrap();

            assert_eq!(second.canonical_name(), first.canonical_name());
            assert_eq!(second.chain_tag(), first.chain_tag());
            assert_eq!(second.is_eth_subdomain(), first.is_eth_subdomain());
            assert_eq!(third, second);
        }

        let query = mainnet("alice.eth:btc").unwrap();
        assert_eq!(mainnet(query.canonical_name()).unwrap(), query);
    }

    #[test]
    fn input_is_trimmed_and_lowercased() {
        let query = mainnet("  Alice.BTC \n").unwrap();
        assert_eq!(query.raw_input(), "Alice.BTC");
        assert_eq!(query.canonical_name(), "alice.eth:btc");
        assert_eq!(query.chain_tag(), "btc");
    }

    #[test]
    fn subdomains_are_detected() {
        let query = mainnet("sub.alice.eth").unwrap();
        assert!(query.is_eth_subdomain());
        assert_eq!(query.label(), "sub.alice");

        let query = mainnet("pay.alice.eth:btc").unwrap();
        assert!(query.is_eth_subdomain());

        let query = mainnet("pay.alice.btc").unwrap();
        assert_eq!(query.canonical_name(), "pay.alice.eth:btc");
        assert!(query.is_eth_subdomain());

        assert!(!mainnet("alice.eth").unwrap().is_eth_subdomain());
        assert!(!mainnet("alice.eth:x").unwrap().is_eth_subdomain());
    }

    #[test]
    fn disallowed_characters_are_rejected() {
        let error = mainnet("bad!name.eth").unwrap_err();
        match error {
            ClassifyError::InvalidFormat { input, reason } => {
                assert_eq!(input, "bad!name.eth");
                assert!(reason.contains('!'));
            }
            other @ ClassifyError::UnsupportedChain { .. } => {
                panic!("Expected InvalidFormat error, got: {other:?}")
            }
        }

        for input in ["alice@home.eth", "a/b.eth", "alice?.eth", "al ice\".eth"] {
            assert!(
                matches!(mainnet(input), Err(ClassifyError::InvalidFormat { .. })),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn short_inputs_are_rejected() {
        for input in ["", "   ", "a", "ab", "abc", "a.b"] {
            assert!(
                matches!(mainnet(input), Err(ClassifyError::InvalidFormat { .. })),
                "{input:?} should be rejected"
            );
        }
        assert!(mainnet("abcd").is_ok());
    }

    #[test]
    fn malformed_labels_are_rejected() {
        let too_long = format!("{}.eth", "a".repeat(64));
        for input in [
            "-alice.eth",
            "alice-.eth",
            "alice..eth",
            ".alice.eth",
            "alice.",
            "alice.eth:",
            "alice_bob.eth",
            "alice.eth:b-tc",
            too_long.as_str(),
        ] {
            assert!(
                matches!(mainnet(input), Err(ClassifyError::InvalidFormat { .. })),
                "{input} should be rejected"
            );
        }

        let longest = format!("{}.eth", "a".repeat(63));
        assert!(mainnet(&longest).is_ok());
    }

    #[test]
    fn unknown_tag_lists_supported_tags() {
        let error = mainnet("alice.zzz").unwrap_err();
        match &error {
            ClassifyError::UnsupportedChain { tag, supported } => {
                assert_eq!(tag, "zzz");
                assert!(supported.contains(&"eth".to_string()));
                assert!(supported.contains(&"btc".to_string()));
                assert_eq!(supported.len(), ChainRegistry::builtin().len());
            }
            other @ ClassifyError::InvalidFormat { .. } => {
                panic!("Expected UnsupportedChain error, got: {other:?}")
            }
        }
        let message = error.to_string();
        assert!(message.starts_with("unsupported chain tag '.zzz'. Supported: .eth, .btc"));

        assert!(matches!(
            mainnet("alice.eth:zzz"),
            Err(ClassifyError::UnsupportedChain { .. })
        ));
    }

    #[test]
    fn network_is_carried() {
        let query = classify("alice.eth", Network::Testnet, ChainRegistry::builtin()).unwrap();
        assert_eq!(query.network(), Network::Testnet);
    }

    #[test]
    fn eth_variant() {
        assert_eq!(mainnet("alice.btc").unwrap().eth_variant(), "alice.eth");
        assert_eq!(mainnet("alice.eth:x").unwrap().eth_variant(), "alice.eth");
        assert_eq!(mainnet("sub.alice.eth").unwrap().eth_variant(), "sub.alice.eth");
    }

    #[test]
    fn query_serialization() {
        let query = mainnet("alice.btc").unwrap();
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["canonical_name"], "alice.eth:btc");
        assert_eq!(json["chain_tag"], "btc");
        assert_eq!(json["is_eth_subdomain"], false);
        assert_eq!(json["network"], "mainnet");
    }
}
