//! CAIP-25 scopes: parsing, validation, support checks and normalization.

mod authorization;
pub use authorization::{BucketedScopes, ProcessedScopes, bucket_scopes, process_scopes};

pub mod constants;

mod filter;
pub use filter::{
    ScopesBySupport, assert_scope_supported, assert_scopes_supported, bucket_scopes_by_support,
};

mod parse;
pub use parse::{ParsedScope, parse_scope_string};

mod scoped_properties;
pub use scoped_properties::{
    Eip3085Error, MAX_SAFE_CHAIN_ID, is_valid_eip3085_params, process_scoped_properties,
    validate_eip3085_params,
};

mod supported;
pub use supported::{
    ChainPredicates, ChainSupport, is_supported_account, is_supported_method,
    is_supported_notification, is_supported_scope_string,
};

mod transform;
pub use transform::{flatten_merge_scopes, flatten_scope, merge_scope_object, merge_scopes};

mod types;
pub use types::{
    AddEthereumChainParameter, AsScopeObject, Caip25Authorization, NativeCurrency,
    RawScopesObject, ScopeObject, ScopeString, ScopedProperties, ScopedPropertyBag, ScopesObject,
};

mod validation;
pub use validation::{ValidScopes, is_valid_scope, validate_scopes};
