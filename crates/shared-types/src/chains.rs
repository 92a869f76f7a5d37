// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Chain tags and their record descriptors
//!
//! This module provides the static table mapping a chain tag (the `btc` in `alice.btc`
//! or `alice.eth:btc`) to the record it selects, its display name and, for wallet
//! records, a block explorer link template.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

/// Placeholder substituted with the resolved value in link templates
const VALUE_PLACEHOLDER: &str = "{value}";

/// The tag every bare name defaults to
pub const ETH_TAG: &str = "eth";

/// Kind of record a chain tag selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A wallet address on some chain
    Wallet,
    /// A free-text record (name, bio, handle, URL)
    Text,
}

/// Static description of a supported chain tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChainDescriptor {
    /// Short tag used in domain input (`eth`, `btc`, `x`, ...)
    #[schema(value_type = String)]
    pub tag: &'static str,
    /// Record key used by providers (`ethereum`, `BTC`, `com.twitter`, ...)
    #[schema(value_type = String)]
    pub record_key: &'static str,
    /// Human-readable chain or record name
    #[schema(value_type = String)]
    pub display_name: &'static str,
    /// Block explorer link for a resolved address, with a `{value}` placeholder
    #[schema(value_type = Option<String>)]
    pub explorer_url_template: Option<&'static str>,
    /// Profile link for a resolved text record, with a `{value}` placeholder
    #[serde(skip)]
    pub profile_url_template: Option<&'static str>,
    /// Whether the record is a wallet address or free text
    pub kind: RecordKind,
}

impl ChainDescriptor {
    const fn wallet(
        tag: &'static str,
        record_key: &'static str,
        display_name: &'static str,
        explorer_url_template: &'static str,
    ) -> Self {
        Self {
            tag,
            record_key,
            display_name,
            explorer_url_template: Some(explorer_url_template),
            profile_url_template: None,
            kind: RecordKind::Wallet,
        }
    }

    const fn text(
        tag: &'static str,
        record_key: &'static str,
        display_name: &'static str,
        profile_url_template: Option<&'static str>,
    ) -> Self {
        Self {
            tag,
            record_key,
            display_name,
            explorer_url_template: None,
            profile_url_template,
            kind: RecordKind::Text,
        }
    }

    /// Returns whether this is the Ethereum tag
    pub fn is_eth(&self) -> bool {
        self.tag == ETH_TAG
    }

    /// Returns whether this tag selects a wallet address
    pub fn is_wallet(&self) -> bool {
        self.kind == RecordKind::Wallet
    }

    /// Block explorer URL for a resolved address, if the chain has an explorer
    pub fn explorer_url(&self, value: &str) -> Option<String> {
        self.explorer_url_template
            .map(|template| template.replace(VALUE_PLACEHOLDER, value))
    }

    /// Outbound link for a resolved value
    ///
    /// Wallet records link to the block explorer, `url` links to the site itself and
    /// social handles link to the profile page. `name` and `bio` have no link.
    pub fn link_for(&self, value: &str) -> Option<String> {
        self.explorer_url(value).or_else(|| {
            self.profile_url_template
                .map(|template| template.replace(VALUE_PLACEHOLDER, value))
        })
    }
}

impl fmt::Display for ChainDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

const BUILTIN_CHAINS: &[ChainDescriptor] = &[
    ChainDescriptor::wallet(
        "eth",
        "ethereum",
        "Ethereum",
        "https://etherscan.io/address/{value}",
    ),
    ChainDescriptor::wallet(
        "btc",
        "BTC",
        "Bitcoin",
        "https://blockstream.info/address/{value}",
    ),
    ChainDescriptor::wallet(
        "doge",
        "dogecoin",
        "Dogecoin",
        "https://dogechain.info/address/{value}",
    ),
    ChainDescriptor::wallet("xrp", "xrp", "XRP", "https://xrpscan.com/account/{value}"),
    ChainDescriptor::wallet(
        "ltc",
        "litecoin",
        "Litecoin",
        "https://blockchair.com/litecoin/address/{value}",
    ),
    ChainDescriptor::wallet(
        "ada",
        "cardano",
        "Cardano",
        "https://cardanoscan.io/address/{value}",
    ),
    ChainDescriptor::wallet("base", "base", "Base", "https://basescan.org/address/{value}"),
    ChainDescriptor::wallet("sol", "SOL", "Solana", "https://solscan.io/account/{value}"),
    ChainDescriptor::wallet(
        "arbi",
        "ARB1",
        "Arbitrum",
        "https://arbiscan.io/address/{value}",
    ),
    ChainDescriptor::wallet(
        "polygon",
        "polygon",
        "Polygon",
        "https://polygonscan.com/address/{value}",
    ),
    ChainDescriptor::wallet(
        "avax",
        "avax",
        "Avalanche",
        "https://snowtrace.io/address/{value}",
    ),
    ChainDescriptor::wallet("bsc", "bsc", "BNB Chain", "https://bscscan.com/address/{value}"),
    ChainDescriptor::wallet(
        "op",
        "op",
        "Optimism",
        "https://optimistic.etherscan.io/address/{value}",
    ),
    ChainDescriptor::wallet(
        "zora",
        "zora",
        "Zora",
        "https://explorer.zora.energy/address/{value}",
    ),
    ChainDescriptor::wallet(
        "linea",
        "linea",
        "Linea",
        "https://lineascan.build/address/{value}",
    ),
    ChainDescriptor::wallet(
        "scroll",
        "scroll",
        "Scroll",
        "https://scrollscan.com/address/{value}",
    ),
    ChainDescriptor::wallet(
        "mantle",
        "mantle",
        "Mantle",
        "https://explorer.mantle.xyz/address/{value}",
    ),
    ChainDescriptor::wallet(
        "celo",
        "celo",
        "Celo",
        "https://explorer.celo.org/address/{value}",
    ),
    ChainDescriptor::wallet(
        "gnosis",
        "gnosis",
        "Gnosis",
        "https://gnosisscan.io/address/{value}",
    ),
    ChainDescriptor::wallet(
        "fantom",
        "fantom",
        "Fantom",
        "https://ftmscan.com/address/{value}",
    ),
    ChainDescriptor::text("x", "com.twitter", "Twitter/X", Some("https://x.com/{value}")),
    ChainDescriptor::text("url", "url", "Website", Some("{value}")),
    ChainDescriptor::text(
        "github",
        "com.github",
        "GitHub",
        Some("https://github.com/{value}"),
    ),
    ChainDescriptor::text("name", "name", "Name", None),
    ChainDescriptor::text("bio", "description", "Bio", None),
];

static BUILTIN: ChainRegistry = ChainRegistry {
    chains: BUILTIN_CHAINS,
};

/// Read-only table of supported chain tags
#[derive(Debug, Clone, Copy)]
pub struct ChainRegistry {
    chains: &'static [ChainDescriptor],
}

impl ChainRegistry {
    /// Returns the built-in chain table
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Look up a descriptor by tag (tags are lowercase)
    pub fn get(&self, tag: &str) -> Option<&'static ChainDescriptor> {
        self.chains.iter().find(|chain| chain.tag == tag)
    }

    /// Returns whether the tag is supported
    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Returns all descriptors in table order
    pub fn iter(&self) -> impl Iterator<Item = &'static ChainDescriptor> + use<> {
        self.chains.iter()
    }

    /// Returns all supported tags in table order
    pub fn tags(&self) -> Vec<&'static str> {
        self.iter().map(|chain| chain.tag).collect()
    }

    /// Supported tags formatted for display, e.g. `.eth, .btc, .doge`
    pub fn supported_tags_display(&self) -> String {
        self.iter()
            .map(|chain| format!(".{}", chain.tag))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Returns the number of supported tags
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
