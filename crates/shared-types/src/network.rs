// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Network selection for name resolution

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Network a resolution request targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Ethereum mainnet and the public resolvers
    #[default]
    Mainnet,
    /// Sepolia testnet, served by the self-hosted resolver only
    Testnet,
}

impl Network {
    /// Returns the lowercase network name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }

    /// Returns whether this is mainnet
    pub const fn is_mainnet(self) -> bool {
        matches!(self, Self::Mainnet)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Network {
    type Err = NetworkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" | "sepolia" => Ok(Self::Testnet),
            _ => Err(NetworkParseError(s.to_string())),
        }
    }
}

/// Error type for network parsing
#[derive(Debug, thiserror::Error)]
#[error("unsupported network: {0}. Supported networks are: mainnet, testnet")]
pub struct NetworkParseError(pub String);
