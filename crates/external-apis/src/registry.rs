// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Provider selection policy
//!
//! This module maps a classified query onto the providers to try and the strategy to
//! try them with. The policy is an ordered table of [`SelectionRule`]s where the first
//! matching rule wins; the table is plain data and can be replaced from configuration.

use serde::{Deserialize, Serialize};
use shared_types::{ChainRegistry, Network, chains::ETH_TAG};
use tracing::debug;

use crate::providers::{Candidate, LookupNetwork, ProviderId};

/// How the candidates of a selection are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Query all candidates concurrently; the first non-empty answer in table order wins
    Race,
    /// Query candidates one at a time; stop at the first non-empty answer
    Sequential,
}

/// Ordered candidates and the strategy to run them with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Providers to try, in priority order
    pub candidates: Vec<Candidate>,
    /// Execution strategy
    pub strategy: Strategy,
}

impl Selection {
    fn new(strategy: Strategy, candidates: impl Into<Vec<Candidate>>) -> Self {
        Self {
            candidates: candidates.into(),
            strategy,
        }
    }
}

/// Which chain tags a rule applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainMatch {
    /// Only the `eth` tag
    Eth,
    /// Every tag except `eth`
    NonEth,
    /// Exactly this tag
    Tag(String),
}

impl ChainMatch {
    fn matches(&self, chain_tag: &str) -> bool {
        match self {
            Self::Eth => chain_tag == ETH_TAG,
            Self::NonEth => chain_tag != ETH_TAG,
            Self::Tag(tag) => tag == chain_tag,
        }
    }
}

/// Conditions of a selection rule; absent fields match anything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleCondition {
    /// Whether the ENS name must (or must not) be a subdomain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<bool>,
    /// Chain tags the rule applies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<ChainMatch>,
    /// Network the rule applies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
}

impl RuleCondition {
    fn matches(&self, chain_tag: &str, network: Network, is_eth_subdomain: bool) -> bool {
        self.subdomain.is_none_or(|subdomain| subdomain == is_eth_subdomain)
            && self
                .chain
                .as_ref()
                .is_none_or(|chain| chain.matches(chain_tag))
            && self.network.is_none_or(|expected| expected == network)
    }
}

/// One row of the selection table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRule {
    /// When this rule applies
    #[serde(default)]
    pub when: RuleCondition,
    /// What to run when it does
    pub selection: Selection,
}

/// Error type for selection table operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[allow(missing_docs)]
pub enum RegistryError {
    /// The table has no rules
    #[error("Selection table has no rules")]
    EmptyTable,

    /// A rule has no candidates
    #[error("Selection rule {index} has no candidates")]
    EmptyCandidates { index: usize },

    /// No rule matches a query
    #[error("No selection rule for chain '{tag}' on {network} (subdomain: {subdomain})")]
    NoMatchingRule {
        tag: String,
        network: Network,
        subdomain: bool,
    },
}

/// Ordered provider selection table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRegistry {
    rules: Vec<SelectionRule>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

impl ProviderRegistry {
    /// Create a registry from an explicit rule table
    pub fn from_rules(rules: Vec<SelectionRule>) -> Result<Self, RegistryError> {
        if rules.is_empty() {
            return Err(RegistryError::EmptyTable);
        }
        if let Some(index) = rules
            .iter()
            .position(|rule| rule.selection.candidates.is_empty())
        {
            return Err(RegistryError::EmptyCandidates { index });
        }
        Ok(Self { rules })
    }

    /// The rule table, in priority order
    pub fn rules(&self) -> &[SelectionRule] {
        &self.rules
    }

    /// Select the candidates for a query; the first matching rule wins
    pub fn select(
        &self,
        chain_tag: &str,
        network: Network,
        is_eth_subdomain: bool,
    ) -> Result<&Selection, RegistryError> {
        let (index, rule) = self
            .rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.when.matches(chain_tag, network, is_eth_subdomain))
            .ok_or_else(|| RegistryError::NoMatchingRule {
                tag: chain_tag.to_string(),
                network,
                subdomain: is_eth_subdomain,
            })?;

        debug!(
            chain = chain_tag,
            %network,
            subdomain = is_eth_subdomain,
            rule = index,
            strategy = ?rule.selection.strategy,
            "selected providers"
        );
        Ok(&rule.selection)
    }

    /// Check that every chain tag has candidates on every network
    pub fn validate(&self, chains: &ChainRegistry) -> Result<(), RegistryError> {
        for chain in chains.iter() {
            for network in [Network::Mainnet, Network::Testnet] {
                for subdomain in [false, true] {
                    self.select(chain.tag, network, subdomain)?;
                }
            }
        }
        Ok(())
    }
}

fn default_rules() -> Vec<SelectionRule> {
    let rule = |subdomain, chain, network, selection| SelectionRule {
        when: RuleCondition {
            subdomain,
            chain,
            network,
        },
        selection,
    };

    vec![
        rule(
            Some(true),
            None,
            None,
            Selection::new(Strategy::Sequential, [Candidate::new(ProviderId::EnsNode)]),
        ),
        rule(
            None,
            Some(ChainMatch::Eth),
            Some(Network::Testnet),
            Selection::new(
                Strategy::Sequential,
                [Candidate::local(LookupNetwork::Sepolia)],
            ),
        ),
        rule(
            None,
            Some(ChainMatch::Eth),
            Some(Network::Mainnet),
            Selection::new(
                Strategy::Race,
                [
                    Candidate::local(LookupNetwork::Mainnet),
                    Candidate::new(ProviderId::EnsNode),
                    Candidate::new(ProviderId::EnsIdeas),
                    Candidate::new(ProviderId::EnsDomains),
                ],
            ),
        ),
        rule(
            None,
            Some(ChainMatch::NonEth),
            Some(Network::Testnet),
            Selection::new(
                Strategy::Sequential,
                [
                    Candidate::local(LookupNetwork::Sepolia),
                    Candidate::new(ProviderId::EnsNode),
                ],
            ),
        ),
        rule(
            None,
            Some(ChainMatch::NonEth),
            Some(Network::Mainnet),
            Selection::new(
                Strategy::Sequential,
                [
                    Candidate::local(LookupNetwork::Mainnet),
                    Candidate::new(ProviderId::EnsNode),
                    Candidate::new(ProviderId::EthXyz),
                ],
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn providers(selection: &Selection) -> Vec<String> {
        selection
            .candidates
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn subdomain_uses_ensnode_only() {
        let registry = ProviderRegistry::default();
        for network in [Network::Mainnet, Network::Testnet] {
            for tag in ["eth", "btc", "x"] {
                let selection = registry.select(tag, network, true).unwrap();
                assert_eq!(selection.strategy, Strategy::Sequential);
                assert_eq!(providers(selection), ["ensnode"]);
            }
        }
    }

    #[test]
    fn eth_testnet_uses_sepolia_resolver() {
        let registry = ProviderRegistry::default();
        let selection = registry.select("eth", Network::Testnet, false).unwrap();
        assert_eq!(selection.strategy, Strategy::Sequential);
        assert_eq!(providers(selection), ["local-resolver(sepolia)"]);
    }

    #[test]
    fn eth_mainnet_races_all_ethereum_providers() {
        let registry = ProviderRegistry::default();
        let selection = registry.select("eth", Network::Mainnet, false).unwrap();
        assert_eq!(selection.strategy, Strategy::Race);
        assert_eq!(
            providers(selection),
            ["local-resolver(mainnet)", "ensnode", "ensideas", "ens-domains"]
        );
    }

    #[test]
    fn non_eth_testnet_falls_back_to_ensnode() {
        let registry = ProviderRegistry::default();
        let selection = registry.select("btc", Network::Testnet, false).unwrap();
        assert_eq!(selection.strategy, Strategy::Sequential);
        assert_eq!(providers(selection), ["local-resolver(sepolia)", "ensnode"]);
    }

    #[test]
    fn non_eth_mainnet_ends_with_eth_xyz() {
        let registry = ProviderRegistry::default();
        let selection = registry.select("github", Network::Mainnet, false).unwrap();
        assert_eq!(selection.strategy, Strategy::Sequential);
        assert_eq!(
            providers(selection),
            ["local-resolver(mainnet)", "ensnode", "eth-xyz"]
        );
    }

    #[test]
    fn default_table_covers_every_chain() {
        let registry = ProviderRegistry::default();
        assert!(registry.validate(ChainRegistry::builtin()).is_ok());

        for chain in ChainRegistry::builtin().iter() {
            for network in [Network::Mainnet, Network::Testnet] {
                let selection = registry.select(chain.tag, network, false).unwrap();
                assert!(!selection.candidates.is_empty());
            }
        }
    }

    #[test]
    fn validate_reports_gaps() {
        let registry = ProviderRegistry::from_rules(vec![SelectionRule {
            when: RuleCondition {
                chain: Some(ChainMatch::Eth),
                ..Default::default()
            },
            selection: Selection::new(Strategy::Race, [Candidate::new(ProviderId::EnsIdeas)]),
        }])
        .unwrap();

        let result = registry.validate(ChainRegistry::builtin());
        assert!(matches!(
            result,
            Err(RegistryError::NoMatchingRule { ref tag, .. }) if tag != "eth"
        ));
    }

    #[test]
    fn from_rules_rejects_empty_tables() {
        assert_eq!(
            ProviderRegistry::from_rules(Vec::new()),
            Err(RegistryError::EmptyTable)
        );

        let rule = SelectionRule {
            when: RuleCondition::default(),
            selection: Selection::new(Strategy::Sequential, Vec::new()),
        };
        assert_eq!(
            ProviderRegistry::from_rules(vec![rule]),
            Err(RegistryError::EmptyCandidates { index: 0 })
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        let catch_all = SelectionRule {
            when: RuleCondition::default(),
            selection: Selection::new(Strategy::Sequential, [Candidate::new(ProviderId::EthXyz)]),
        };
        let specific = SelectionRule {
            when: RuleCondition {
                chain: Some(ChainMatch::Tag("btc".to_string())),
                ..Default::default()
            },
            selection: Selection::new(Strategy::Race, [Candidate::new(ProviderId::EnsNode)]),
        };

        let registry = ProviderRegistry::from_rules(vec![catch_all, specific]).unwrap();
        let selection = registry.select("btc", Network::Mainnet, false).unwrap();
        assert_eq!(providers(selection), ["eth-xyz"]);
    }

    #[test]
    fn rules_deserialize_from_json() {
        let rules: Vec<SelectionRule> = serde_json::from_str(
            r#"[
                {
                    "when": {"chain": {"tag": "sol"}, "network": "mainnet"},
                    "selection": {
                        "strategy": "race",
                        "candidates": [
                            {"provider": "local-resolver", "timeout_ms": 800},
                            {"provider": "eth-xyz"}
                        ]
                    }
                },
                {
                    "selection": {"strategy": "sequential", "candidates": [{"provider": "ensnode"}]}
                }
            ]"#,
        )
        .unwrap();

        let registry = ProviderRegistry::from_rules(rules).unwrap();
        let selection = registry.select("sol", Network::Mainnet, false).unwrap();
        assert_eq!(selection.strategy, Strategy::Race);
        assert_eq!(selection.candidates[0].timeout_ms, Some(800));

        let fallback = registry.select("sol", Network::Testnet, false).unwrap();
        assert_eq!(providers(fallback), ["ensnode"]);
        assert!(registry.validate(ChainRegistry::builtin()).is_ok());
    }

    #[test]
    fn registry_error_display() {
        let error = RegistryError::NoMatchingRule {
            tag: "btc".to_string(),
            network: Network::Testnet,
            subdomain: false,
        };
        assert_eq!(
            error.to_string(),
            "No selection rule for chain 'btc' on testnet (subdomain: false)"
        );
    }
}
