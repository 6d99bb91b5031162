use super::{
    filter::{ScopesBySupport, bucket_scopes_by_support},
    supported::ChainSupport,
    transform::flatten_merge_scopes,
    types::{AsScopeObject, Caip25Authorization, ScopesObject},
    validation::{ValidScopes, validate_scopes},
};
use multichain_rpc::RpcError;
use std::collections::BTreeMap;

/// Validated and flattened scopes of an authorization request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessedScopes {
    pub flattened_required_scopes: ScopesObject,
    pub flattened_optional_scopes: ScopesObject,
}

/// Validates, then flattens and merges, required and optional scopes independently.
///
/// Invalid entries are dropped, so the result may be smaller than the request. Required and
/// optional scopes are not merged with each other here.
pub fn process_scopes<V: AsScopeObject>(
    required_scopes: &BTreeMap<String, V>,
    optional_scopes: &BTreeMap<String, V>,
) -> ProcessedScopes {
    let ValidScopes { valid_required_scopes, valid_optional_scopes } =
        validate_scopes(required_scopes, optional_scopes);

    ProcessedScopes {
        flattened_required_scopes: flatten_merge_scopes(&valid_required_scopes),
        flattened_optional_scopes: flatten_merge_scopes(&valid_optional_scopes),
    }
}

/// Scopes partitioned by what the wallet can do with them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BucketedScopes {
    /// Scopes the wallet serves right now.
    pub supported_scopes: ScopesObject,
    /// Scopes the wallet could serve after adding a network.
    pub supportable_scopes: ScopesObject,
    pub unsupported_scopes: ScopesObject,
}

/// Partitions `scopes` into supported, supportable and unsupported scopes.
///
/// Every input key lands in exactly one bucket.
pub fn bucket_scopes(scopes: &ScopesObject, chains: &impl ChainSupport) -> BucketedScopes {
    let ScopesBySupport { supported_scopes, unsupported_scopes: maybe_supportable } =
        bucket_scopes_by_support(scopes, |chain_id| chains.is_chain_id_supported(chain_id));

    let ScopesBySupport { supported_scopes: supportable_scopes, unsupported_scopes } =
        bucket_scopes_by_support(&maybe_supportable, |chain_id| {
            chains.is_chain_id_supportable(chain_id)
        });

    trace!(
        target: "multichain::scope",
        supported = supported_scopes.len(),
        supportable = supportable_scopes.len(),
        unsupported = unsupported_scopes.len(),
        "bucketed scopes"
    );

    BucketedScopes { supported_scopes, supportable_scopes, unsupported_scopes }
}

impl Caip25Authorization {
    /// Ensures at least one of `requiredScopes` and `optionalScopes` is present.
    pub fn ensure_scopes_present(&self) -> Result<(), RpcError> {
        if self.required_scopes.is_none() && self.optional_scopes.is_none() {
            return Err(RpcError::invalid_params(
                "Expected either \"requiredScopes\" or \"optionalScopes\" to be present",
            ));
        }
        Ok(())
    }

    /// Parses a raw request payload.
    pub fn from_request(params: serde_json::Value) -> Result<Self, RpcError> {
        let authorization: Self = serde_json::from_value(params)
            .map_err(|err| RpcError::invalid_params(format!("Invalid authorization: {err}")))?;
        authorization.ensure_scopes_present()?;
        Ok(authorization)
    }

    /// Validates and flattens the requested scopes, see [`process_scopes`].
    pub fn process_scopes(&self) -> ProcessedScopes {
        process_scopes(
            self.required_scopes.as_ref().unwrap_or(&BTreeMap::new()),
            self.optional_scopes.as_ref().unwrap_or(&BTreeMap::new()),
        )
    }
}
