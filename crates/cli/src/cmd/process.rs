use eyre::Result;
use multichain_core::scope::{
    BucketedScopes, Caip25Authorization, ChainSupport, ProcessedScopes, ScopedProperties,
    ScopesObject, assert_scopes_supported, bucket_scopes,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Scopes split by what the wallet can do with them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScopeBuckets {
    pub supported: ScopesObject,
    pub supportable: ScopesObject,
    pub unsupported: ScopesObject,
}

impl From<BucketedScopes> for ScopeBuckets {
    fn from(buckets: BucketedScopes) -> Self {
        Self {
            supported: buckets.supported_scopes,
            supportable: buckets.supportable_scopes,
            unsupported: buckets.unsupported_scopes,
        }
    }
}

/// The normalized form of an authorization request.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedRequest {
    pub required_scopes: ScopeBuckets,
    pub optional_scopes: ScopeBuckets,
    pub session_properties: Map<String, Value>,
    pub scoped_properties: ScopedProperties,
}

/// Validates, flattens and buckets the scopes of `request`.
///
/// With `assert_supported`, the first unsupported required scope fails the whole request with
/// the matching CAIP-25 error.
pub fn process_request(
    request: Value,
    chains: &impl ChainSupport,
    assert_supported: bool,
) -> Result<ProcessedRequest> {
    let authorization = Caip25Authorization::from_request(request)?;
    let ProcessedScopes { flattened_required_scopes, flattened_optional_scopes } =
        authorization.process_scopes();

    if assert_supported {
        assert_scopes_supported(&flattened_required_scopes, |chain_id| {
            chains.is_chain_id_supported(chain_id)
        })?;
    }

    let processed = ProcessedRequest {
        required_scopes: bucket_scopes(&flattened_required_scopes, chains).into(),
        optional_scopes: bucket_scopes(&flattened_optional_scopes, chains).into(),
        scoped_properties: authorization.process_scoped_properties(),
        session_properties: authorization.session_properties.unwrap_or_default(),
    };
    debug!(
        target: "multichain::cli",
        required = processed.required_scopes.supported.len(),
        optional = processed.optional_scopes.supported.len(),
        "processed request"
    );
    Ok(processed)
}

/// Sanitizes the scoped properties of `request`.
pub fn process_scoped_properties(request: Value) -> Result<ScopedProperties> {
    let authorization = Caip25Authorization::from_request(request)?;
    Ok(authorization.process_scoped_properties())
}
