//! Chain selections and the wallet's chain support derived from them.

use alloy_chains::{Chain, NamedChain};
use alloy_primitives::ChainId;
use multichain_core::scope::ChainSupport;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A set of chains: everything, nothing, or an explicit list.
///
/// Serialized as `"all"`, `"none"`, or a list of chain ids and chain names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ChainSelection {
    All,
    #[default]
    None,
    Chains(Vec<Chain>),
}

impl ChainSelection {
    /// Whether `chain_id` is part of the selection.
    pub fn is_match(&self, chain_id: ChainId) -> bool {
        match self {
            Self::All => true,
            Self::None => false,
            Self::Chains(chains) => chains.iter().any(|c| c.id() == chain_id),
        }
    }
}

impl From<Vec<Chain>> for ChainSelection {
    fn from(chains: Vec<Chain>) -> Self {
        Self::Chains(chains)
    }
}

impl<const N: usize> From<[NamedChain; N]> for ChainSelection {
    fn from(chains: [NamedChain; N]) -> Self {
        Self::Chains(chains.into_iter().map(Chain::from_named).collect())
    }
}

impl Serialize for ChainSelection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::All => serializer.serialize_str("all"),
            Self::None => serializer.serialize_str("none"),
            Self::Chains(chains) => chains.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ChainSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Chains {
            Keyword(String),
            Chains(Vec<Chain>),
        }

        match Chains::deserialize(deserializer)? {
            Chains::Keyword(s) => match s.as_str() {
                "all" => Ok(Self::All),
                "none" => Ok(Self::None),
                s => Err(serde::de::Error::unknown_variant(s, &["all", "none"])),
            },
            Chains::Chains(chains) => Ok(Self::Chains(chains)),
        }
    }
}

/// Chain support backed by configured chain selections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfiguredChainSupport {
    /// Chains with a live network client.
    pub supported: ChainSelection,
    /// Chains the wallet could add a network client for.
    pub supportable: ChainSelection,
}

impl ChainSupport for ConfiguredChainSupport {
    fn is_chain_id_supported(&self, chain_id: ChainId) -> bool {
        self.supported.is_match(chain_id)
    }

    fn is_chain_id_supportable(&self, chain_id: ChainId) -> bool {
        self.supportable.is_match(chain_id)
    }
}
