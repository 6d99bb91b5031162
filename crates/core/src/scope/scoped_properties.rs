use super::{
    parse::parse_scope_string,
    types::{AddEthereumChainParameter, Caip25Authorization, ScopedProperties, ScopedPropertyBag},
};
use crate::caip::{KnownCaipNamespace, parse_eip155_reference, parse_hex_chain_id};
use alloy_primitives::ChainId;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use url::Url;

/// The largest chain id that can be represented safely in a JavaScript number.
///
/// See <https://github.com/ethereum/EIPs/issues/2294>
pub const MAX_SAFE_CHAIN_ID: ChainId = 4_503_599_627_370_476;

/// Reasons an `eip3085` scoped property is rejected.
#[derive(Debug, thiserror::Error)]
pub enum Eip3085Error {
    #[error("scope {0:?} is not an eip155 chain id")]
    NotAnEip155Chain(String),
    #[error("malformed parameters: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid chain id {0:?}")]
    InvalidChainId(String),
    #[error("chain id {chain_id:?} does not match scope {scope:?}")]
    ChainIdMismatch { scope: String, chain_id: String },
    #[error("missing chain name")]
    MissingChainName,
    #[error("invalid {field} url {url:?}")]
    InvalidUrl { field: &'static str, url: String },
    #[error("expected at least one rpc url")]
    MissingRpcUrls,
    #[error("invalid native currency: {0}")]
    InvalidNativeCurrency(&'static str),
}

/// Validates `params` as `wallet_addEthereumChain` parameters for the chain named by `scope`.
pub fn validate_eip3085_params(
    scope: &str,
    params: &Value,
) -> Result<AddEthereumChainParameter, Eip3085Error> {
    let parsed = parse_scope_string(scope);
    let scope_chain_id = match (parsed.namespace, parsed.reference) {
        (Some(namespace), Some(reference)) if namespace == KnownCaipNamespace::Eip155.as_str() => {
            parse_eip155_reference(reference)
                .map_err(|_| Eip3085Error::NotAnEip155Chain(scope.to_string()))?
        }
        _ => return Err(Eip3085Error::NotAnEip155Chain(scope.to_string())),
    };

    let params = AddEthereumChainParameter::deserialize(params)?;

    let chain_id = parse_strict_hex_chain_id(&params.chain_id)
        .ok_or_else(|| Eip3085Error::InvalidChainId(params.chain_id.clone()))?;
    if chain_id != scope_chain_id {
        return Err(Eip3085Error::ChainIdMismatch {
            scope: scope.to_string(),
            chain_id: params.chain_id.clone(),
        });
    }

    if params.chain_name.trim().is_empty() {
        return Err(Eip3085Error::MissingChainName);
    }

    if params.rpc_urls.is_empty() {
        return Err(Eip3085Error::MissingRpcUrls);
    }
    ensure_http_urls("rpc", &params.rpc_urls)?;
    if let Some(urls) = &params.block_explorer_urls {
        ensure_http_urls("block explorer", urls)?;
    }
    if let Some(urls) = &params.icon_urls {
        ensure_http_urls("icon", urls)?;
    }

    let currency = &params.native_currency;
    if currency.name.trim().is_empty() {
        return Err(Eip3085Error::InvalidNativeCurrency("missing name"));
    }
    if !(2..=6).contains(&currency.symbol.chars().count()) {
        return Err(Eip3085Error::InvalidNativeCurrency("symbol must be 2-6 characters"));
    }
    if currency.decimals != 18 {
        return Err(Eip3085Error::InvalidNativeCurrency("decimals must be 18"));
    }

    Ok(params)
}

/// Returns true if `params` are valid `wallet_addEthereumChain` parameters for `scope`.
pub fn is_valid_eip3085_params(scope: &str, params: &Value) -> bool {
    validate_eip3085_params(scope, params).is_ok()
}

/// Sanitizes scoped properties against the requested scopes.
///
/// Properties for scopes that were not requested are dropped. Every requested scope with
/// properties yields an entry, possibly empty: only a valid `eip3085` property is retained.
pub fn process_scoped_properties<V>(
    required_scopes: &BTreeMap<String, V>,
    optional_scopes: &BTreeMap<String, V>,
    scoped_properties: Option<&BTreeMap<String, Value>>,
) -> ScopedProperties {
    let Some(scoped_properties) = scoped_properties else {
        return ScopedProperties::new();
    };

    let mut processed = ScopedProperties::new();
    for (scope, properties) in scoped_properties {
        if !required_scopes.contains_key(scope) && !optional_scopes.contains_key(scope) {
            trace!(target: "multichain::scope", %scope, "dropping properties of unrequested scope");
            continue;
        }

        let eip3085 = properties.get("eip3085").and_then(|params| {
            validate_eip3085_params(scope, params)
                .inspect_err(|err| {
                    debug!(target: "multichain::scope", %scope, %err, "dropping eip3085 property");
                })
                .ok()
        });
        processed.insert(scope.clone(), ScopedPropertyBag { eip3085 });
    }
    processed
}

impl Caip25Authorization {
    /// Sanitizes the request's scoped properties, see [`process_scoped_properties`].
    pub fn process_scoped_properties(&self) -> ScopedProperties {
        process_scoped_properties(
            self.required_scopes.as_ref().unwrap_or(&BTreeMap::new()),
            self.optional_scopes.as_ref().unwrap_or(&BTreeMap::new()),
            self.scoped_properties.as_ref(),
        )
    }
}

/// Parses a lower-case, `0x`-prefixed hex chain id without leading zeros.
fn parse_strict_hex_chain_id(s: &str) -> Option<ChainId> {
    let digits = s.strip_prefix("0x")?;
    let well_formed = !digits.starts_with('0') &&
        digits.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    if !well_formed {
        return None;
    }
    parse_hex_chain_id(s).filter(|chain_id| (1..=MAX_SAFE_CHAIN_ID).contains(chain_id))
}

fn ensure_http_urls(field: &'static str, urls: &[String]) -> Result<(), Eip3085Error> {
    for url in urls {
        let is_http =
            Url::parse(url).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"));
        if !is_http {
            return Err(Eip3085Error::InvalidUrl { field, url: url.clone() });
        }
    }
    Ok(())
}
