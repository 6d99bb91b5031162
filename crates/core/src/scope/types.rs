use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{borrow::Cow, collections::BTreeMap};

/// A CAIP namespace (`eip155`) or CAIP-2 chain id (`eip155:1`).
pub type ScopeString = String;

/// Scopes as received from a requesting origin, before validation.
///
/// Values stay untyped so a single malformed entry can be dropped without rejecting the whole
/// request.
pub type RawScopesObject = BTreeMap<ScopeString, Value>;

/// Validated scopes keyed by scope string.
pub type ScopesObject = BTreeMap<ScopeString, ScopeObject>;

/// The capabilities requested for, or granted to, a single scope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScopeObject {
    /// Chain ids a namespace-level declaration applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    pub methods: Vec<String>,
    pub notifications: Vec<String>,
    /// CAIP-10 account ids.
    #[serde(default)]
    pub accounts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_documents: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_endpoints: Option<Vec<String>>,
}

impl ScopeObject {
    /// Creates a scope object with the given methods and notifications.
    pub fn new<M, N>(methods: M, notifications: N) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        Self {
            methods: methods.into_iter().map(Into::into).collect(),
            notifications: notifications.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_accounts<I>(mut self, accounts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.accounts = accounts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scopes<I>(mut self, scopes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.scopes = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the nested scopes list, empty if absent.
    pub fn nested_scopes(&self) -> &[String] {
        self.scopes.as_deref().unwrap_or_default()
    }
}

/// Anything that may hold a [`ScopeObject`].
///
/// Implemented for raw JSON values, which only yield an object if they have the right shape, and
/// for [`ScopeObject`] itself.
pub trait AsScopeObject {
    fn as_scope_object(&self) -> Option<Cow<'_, ScopeObject>>;
}

impl AsScopeObject for ScopeObject {
    fn as_scope_object(&self) -> Option<Cow<'_, ScopeObject>> {
        Some(Cow::Borrowed(self))
    }
}

impl AsScopeObject for Value {
    fn as_scope_object(&self) -> Option<Cow<'_, ScopeObject>> {
        ScopeObject::deserialize(self).ok().map(Cow::Owned)
    }
}

/// A CAIP-25 authorization request, e.g. the params of `wallet_createSession`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caip25Authorization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_scopes: Option<RawScopesObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_scopes: Option<RawScopesObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_properties: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoped_properties: Option<BTreeMap<ScopeString, Value>>,
}

/// Out-of-band properties attached to a requested scope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedPropertyBag {
    /// `wallet_addEthereumChain` parameters for the scope's chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip3085: Option<AddEthereumChainParameter>,
}

/// Sanitized scoped properties keyed by scope string.
pub type ScopedProperties = BTreeMap<ScopeString, ScopedPropertyBag>;

/// EIP-3085 `wallet_addEthereumChain` parameters.
///
/// See <https://eips.ethereum.org/EIPS/eip-3085>
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddEthereumChainParameter {
    pub chain_id: String,
    pub chain_name: String,
    pub rpc_urls: Vec<String>,
    pub native_currency: NativeCurrency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_explorer_urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_urls: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}
