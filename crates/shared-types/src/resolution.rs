// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Resolution result type

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A normalized value produced by one provider for one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResolutionResult {
    /// The resolved scalar (address, handle, URL or text)
    #[schema(example = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045")]
    pub value: String,
    /// Identifier of the provider that answered
    #[schema(example = "local-resolver")]
    pub provider_id: String,
    /// Chain tag the value belongs to
    #[schema(example = "eth")]
    pub chain_tag: String,
}

impl ResolutionResult {
    /// Create a new resolution result
    pub fn new(
        value: impl Into<String>,
        provider_id: impl Into<String>,
        chain_tag: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            provider_id: provider_id.into(),
            chain_tag: chain_tag.into(),
        }
    }
}
