//! CAIP-2 chain ids and CAIP-10 account ids.
//!
//! See <https://chainagnostic.org/CAIPs/caip-2> and <https://chainagnostic.org/CAIPs/caip-10>.

use alloy_primitives::ChainId;
use regex::Regex;
use std::{fmt, str::FromStr, sync::LazyLock};

static NAMESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-z0-9]{3,8}$").unwrap());

static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-_a-zA-Z0-9]{1,32}$").unwrap());

static CHAIN_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<namespace>[-a-z0-9]{3,8}):(?<reference>[-_a-zA-Z0-9]{1,32})$").unwrap()
});

static ACCOUNT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?<chain_id>(?<namespace>[-a-z0-9]{3,8}):(?<reference>[-_a-zA-Z0-9]{1,32})):(?<address>[-.%a-zA-Z0-9]{1,128})$",
    )
    .unwrap()
});

/// Errors raised when parsing CAIP identifiers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CaipError {
    #[error("invalid CAIP-2 chain id: {0:?}")]
    InvalidChainId(String),
    #[error("invalid CAIP-10 account id: {0:?}")]
    InvalidAccountId(String),
    #[error("invalid eip155 chain reference: {0:?}")]
    InvalidEip155Reference(String),
}

/// Namespaces the wallet knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KnownCaipNamespace {
    /// Ethereum and EVM compatible chains.
    Eip155,
    /// Wallet-level methods that are not bound to a chain.
    Wallet,
    Bip122,
    Solana,
}

impl KnownCaipNamespace {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eip155 => "eip155",
            Self::Wallet => "wallet",
            Self::Bip122 => "bip122",
            Self::Solana => "solana",
        }
    }

    /// Returns the known namespace matching `namespace`, if any.
    pub fn from_namespace(namespace: &str) -> Option<Self> {
        match namespace {
            "eip155" => Some(Self::Eip155),
            "wallet" => Some(Self::Wallet),
            "bip122" => Some(Self::Bip122),
            "solana" => Some(Self::Solana),
            _ => None,
        }
    }
}

impl fmt::Display for KnownCaipNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if `s` is a CAIP-2 namespace, e.g. `eip155`.
pub fn is_caip_namespace(s: &str) -> bool {
    NAMESPACE_RE.is_match(s)
}

/// Returns true if `s` is a CAIP-2 reference, e.g. `1`.
pub fn is_caip_reference(s: &str) -> bool {
    REFERENCE_RE.is_match(s)
}

/// Returns true if `s` is a CAIP-2 chain id, e.g. `eip155:1`.
pub fn is_caip_chain_id(s: &str) -> bool {
    CHAIN_ID_RE.is_match(s)
}

/// Returns true if `s` is a CAIP-10 account id, e.g.
/// `eip155:1:0xab16a96d359ec26a11e2c2b3d8f8b8942d5bfcdb`.
pub fn is_caip_account_id(s: &str) -> bool {
    ACCOUNT_ID_RE.is_match(s)
}

/// A CAIP-2 chain id: `namespace:reference`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaipChainId {
    pub namespace: String,
    pub reference: String,
}

impl CaipChainId {
    pub fn new(namespace: impl Into<String>, reference: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), reference: reference.into() }
    }

    /// Returns the `eip155` chain id for the given numeric chain id.
    pub fn eip155(chain_id: ChainId) -> Self {
        Self::new(KnownCaipNamespace::Eip155.as_str(), chain_id.to_string())
    }

    /// Returns the numeric chain id if this is an `eip155` chain id.
    pub fn eip155_chain_id(&self) -> Option<ChainId> {
        (self.namespace == KnownCaipNamespace::Eip155.as_str())
            .then(|| parse_eip155_reference(&self.reference).ok())
            .flatten()
    }
}

impl FromStr for CaipChainId {
    type Err = CaipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = CHAIN_ID_RE.captures(s).ok_or_else(|| CaipError::InvalidChainId(s.to_string()))?;
        Ok(Self::new(&caps["namespace"], &caps["reference"]))
    }
}

impl fmt::Display for CaipChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.reference)
    }
}

/// A CAIP-10 account id: `namespace:reference:address`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaipAccountId {
    pub chain_id: CaipChainId,
    pub address: String,
}

impl FromStr for CaipAccountId {
    type Err = CaipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps =
            ACCOUNT_ID_RE.captures(s).ok_or_else(|| CaipError::InvalidAccountId(s.to_string()))?;
        Ok(Self {
            chain_id: CaipChainId::new(&caps["namespace"], &caps["reference"]),
            address: caps["address"].to_string(),
        })
    }
}

impl fmt::Display for CaipAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.address)
    }
}

/// Parses the decimal reference of an `eip155` chain id.
///
/// The reference must be in canonical form, so `01` is rejected.
pub fn parse_eip155_reference(reference: &str) -> Result<ChainId, CaipError> {
    let canonical = !reference.is_empty() &&
        reference.bytes().all(|b| b.is_ascii_digit()) &&
        (reference == "0" || !reference.starts_with('0'));
    if !canonical {
        return Err(CaipError::InvalidEip155Reference(reference.to_string()));
    }
    reference.parse().map_err(|_| CaipError::InvalidEip155Reference(reference.to_string()))
}

/// Formats a chain id as a `0x`-prefixed hex string, e.g. `0x1`.
pub fn to_hex_chain_id(chain_id: ChainId) -> String {
    format!("{chain_id:#x}")
}

/// Parses a `0x`-prefixed hex chain id.
pub fn parse_hex_chain_id(s: &str) -> Option<ChainId> {
    let digits = s.strip_prefix("0x")?;
    if digits.is_empty() {
        return None;
    }
    ChainId::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_grammar() {
        assert!(is_caip_namespace("eip155"));
        assert!(is_caip_namespace("wallet"));
        assert!(is_caip_namespace("bip-122"));
        assert!(!is_caip_namespace("ei"));
        assert!(!is_caip_namespace("Eip155"));
        assert!(!is_caip_namespace("toolongnamespace"));
        assert!(!is_caip_namespace("eip155:1"));
    }

    #[test]
    fn chain_id_grammar() {
        assert!(is_caip_chain_id("eip155:1"));
        assert!(is_caip_chain_id("wallet:eip155"));
        assert!(is_caip_chain_id("bip122:000000000019d6689c085ae165831e93"));
        assert!(!is_caip_chain_id("eip155"));
        assert!(!is_caip_chain_id("eip155:"));
        assert!(!is_caip_chain_id("eip155:1:2"));
        assert!(!is_caip_chain_id(&format!("eip155:{}", "1".repeat(33))));
    }

    #[test]
    fn parses_account_id() {
        let account: CaipAccountId =
            "eip155:1:0xab16a96D359eC26a11e2C2b3d8f8B8942d5Bfcdb".parse().unwrap();
        assert_eq!(account.chain_id, CaipChainId::new("eip155", "1"));
        assert_eq!(account.address, "0xab16a96D359eC26a11e2C2b3d8f8B8942d5Bfcdb");
        assert_eq!(account.to_string(), "eip155:1:0xab16a96D359eC26a11e2C2b3d8f8B8942d5Bfcdb");

        assert!("eip155:1".parse::<CaipAccountId>().is_err());
        assert!("eip155:1:0x!".parse::<CaipAccountId>().is_err());
    }

    #[test]
    fn eip155_references() {
        assert_eq!(parse_eip155_reference("1"), Ok(1));
        assert_eq!(parse_eip155_reference("59144"), Ok(59144));
        assert!(parse_eip155_reference("0x1").is_err());
        assert!(parse_eip155_reference("+1").is_err());
        assert!(parse_eip155_reference("").is_err());
        assert!(parse_eip155_reference("01").is_err());
        assert!(parse_eip155_reference("00").is_err());
        assert_eq!(parse_eip155_reference("0"), Ok(0));
        assert_eq!(parse_eip155_reference("10"), Ok(10));
        assert_eq!("eip155:01".parse::<CaipChainId>().unwrap().eip155_chain_id(), None);
        assert!(parse_eip155_reference("99999999999999999999999").is_err());

        assert_eq!(CaipChainId::eip155(10).to_string(), "eip155:10");
        assert_eq!("eip155:137".parse::<CaipChainId>().unwrap().eip155_chain_id(), Some(137));
        assert_eq!("bip122:1".parse::<CaipChainId>().unwrap().eip155_chain_id(), None);
    }

    #[test]
    fn hex_chain_ids() {
        assert_eq!(to_hex_chain_id(1), "0x1");
        assert_eq!(to_hex_chain_id(59144), "0xe708");
        assert_eq!(parse_hex_chain_id("0xe708"), Some(59144));
        assert_eq!(parse_hex_chain_id("0x"), None);
        assert_eq!(parse_hex_chain_id("1"), None);
    }
}
