use super::{
    supported::{is_supported_method, is_supported_notification, is_supported_scope_string},
    types::{ScopeObject, ScopesObject},
};
use alloy_primitives::ChainId;
use multichain_rpc::RpcError;

/// Asserts that the wallet supports `scope` and everything `scope_object` asks for.
///
/// Checks run in a fixed order and the first failure is returned: the scope string (`5100`),
/// then each method (`5101`), then each notification (`5102`).
pub fn assert_scope_supported(
    scope: &str,
    scope_object: &ScopeObject,
    is_chain_id_supported: impl Fn(ChainId) -> bool,
) -> Result<(), RpcError> {
    if !is_supported_scope_string(scope, is_chain_id_supported) {
        return Err(RpcError::unsupported_chains());
    }
    if !scope_object.methods.iter().all(|method| is_supported_method(scope, method)) {
        return Err(RpcError::unsupported_methods());
    }
    if !scope_object
        .notifications
        .iter()
        .all(|notification| is_supported_notification(scope, notification))
    {
        return Err(RpcError::unsupported_notifications());
    }
    Ok(())
}

/// Asserts every entry of `scopes` is supported, failing at the first one that is not.
pub fn assert_scopes_supported(
    scopes: &ScopesObject,
    is_chain_id_supported: impl Fn(ChainId) -> bool,
) -> Result<(), RpcError> {
    for (scope, scope_object) in scopes {
        assert_scope_supported(scope, scope_object, &is_chain_id_supported).inspect_err(|err| {
            debug!(target: "multichain::scope", %scope, %err, "unsupported scope");
        })?;
    }
    Ok(())
}

/// Scopes split by a single support predicate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopesBySupport {
    pub supported_scopes: ScopesObject,
    pub unsupported_scopes: ScopesObject,
}

/// Splits `scopes` into supported and unsupported entries using `is_chain_id_supported`.
pub fn bucket_scopes_by_support(
    scopes: &ScopesObject,
    is_chain_id_supported: impl Fn(ChainId) -> bool,
) -> ScopesBySupport {
    let mut buckets = ScopesBySupport::default();
    for (scope, scope_object) in scopes {
        let is_supported =
            assert_scope_supported(scope, scope_object, &is_chain_id_supported).is_ok();
        let bucket = if is_supported {
            &mut buckets.supported_scopes
        } else {
            &mut buckets.unsupported_scopes
        };
        bucket.insert(scope.clone(), scope_object.clone());
    }
    buckets
}
