use multichain_core::scope::{ScopeObject, ScopesObject, merge_scopes};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `authorizedScopes` caveat value persisted with an `endowment:caip25` permission.
///
/// Both scope maps are stored in normalized form: validated, flattened and merged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caip25CaveatValue {
    pub required_scopes: ScopesObject,
    pub optional_scopes: ScopesObject,
    #[serde(default)]
    pub session_properties: Map<String, Value>,
}

impl Caip25CaveatValue {
    pub fn new(required_scopes: ScopesObject, optional_scopes: ScopesObject) -> Self {
        Self { required_scopes, optional_scopes, session_properties: Map::new() }
    }

    /// Returns true if `scope` is granted as either a required or an optional scope.
    pub fn contains_scope(&self, scope: &str) -> bool {
        self.required_scopes.contains_key(scope) || self.optional_scopes.contains_key(scope)
    }

    /// Iterates over required then optional scopes.
    pub fn scopes(&self) -> impl Iterator<Item = (&String, &ScopeObject)> {
        self.required_scopes.iter().chain(&self.optional_scopes)
    }
}

/// Returns the merged view of required and optional scopes.
pub fn get_session_scopes(value: &Caip25CaveatValue) -> ScopesObject {
    merge_scopes(&value.required_scopes, &value.optional_scopes)
}

/// Merges an incremental grant into an existing caveat value.
///
/// Scopes are merged per side; session properties from `right` override those of `left`.
pub fn merge_caveat_values(
    left: &Caip25CaveatValue,
    right: &Caip25CaveatValue,
) -> Caip25CaveatValue {
    let mut session_properties = left.session_properties.clone();
    session_properties.extend(right.session_properties.clone());
    Caip25CaveatValue {
        required_scopes: merge_scopes(&left.required_scopes, &right.required_scopes),
        optional_scopes: merge_scopes(&left.optional_scopes, &right.optional_scopes),
        session_properties,
    }
}
