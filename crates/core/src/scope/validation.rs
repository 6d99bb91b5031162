use super::{
    parse::{ParsedScope, parse_scope_string},
    types::{AsScopeObject, ScopeObject, ScopesObject},
};
use std::collections::BTreeMap;

impl ScopeObject {
    /// Returns true if this object is a valid declaration for `scope`.
    ///
    /// The key must be a namespace or chain id. A non-empty `scopes` list is only allowed under a
    /// namespace key and may only name chain ids of that namespace. Method and notification names
    /// must be non-empty.
    pub fn is_valid_for(&self, scope: &str) -> bool {
        let ParsedScope { namespace, reference } = parse_scope_string(scope);
        let Some(namespace) = namespace else {
            return false;
        };

        let nested = self.nested_scopes();
        if !nested.is_empty() {
            if reference.is_some() {
                return false;
            }
            let same_namespace = nested.iter().all(|nested| {
                let parsed = parse_scope_string(nested);
                parsed.is_chain_id() && parsed.namespace == Some(namespace)
            });
            if !same_namespace {
                return false;
            }
        }

        self.methods.iter().all(|method| !method.is_empty()) &&
            self.notifications.iter().all(|notification| !notification.is_empty())
    }
}

/// Returns true if `scope_object` is a well-formed declaration for `scope`.
///
/// Raw values with unexpected keys or mistyped fields are never valid.
pub fn is_valid_scope<V: AsScopeObject + ?Sized>(scope: &str, scope_object: &V) -> bool {
    scope_object.as_scope_object().is_some_and(|object| object.is_valid_for(scope))
}

/// The subset of the requested scopes that passed validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidScopes {
    pub valid_required_scopes: ScopesObject,
    pub valid_optional_scopes: ScopesObject,
}

/// Filters both scope sets down to their valid entries.
///
/// Invalid entries are dropped, this never fails.
pub fn validate_scopes<V: AsScopeObject>(
    required_scopes: &BTreeMap<String, V>,
    optional_scopes: &BTreeMap<String, V>,
) -> ValidScopes {
    ValidScopes {
        valid_required_scopes: filter_valid(required_scopes),
        valid_optional_scopes: filter_valid(optional_scopes),
    }
}

fn filter_valid<V: AsScopeObject>(scopes: &BTreeMap<String, V>) -> ScopesObject {
    scopes
        .iter()
        .filter_map(|(scope, value)| {
            let object = value.as_scope_object().filter(|object| object.is_valid_for(scope));
            if object.is_none() {
                debug!(target: "multichain::scope", %scope, "dropping invalid scope");
            }
            object.map(|object| (scope.clone(), object.into_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::types::RawScopesObject;
    use serde_json::{Value, json};

    fn valid_with_accounts() -> Value {
        json!({
            "methods": ["eth_chainId"],
            "notifications": ["accountsChanged"],
            "accounts": ["eip155:1:0x5cfe73b6021e818b776b421b1c4db2474086a7e1"],
        })
    }

    #[test]
    fn rejects_unexpected_properties() {
        let object = json!({ "methods": [], "notifications": [], "unexpectedParam": "x" });
        assert!(!is_valid_scope("eip155:1", &object));
    }

    #[test]
    fn requires_methods_and_notifications() {
        assert!(!is_valid_scope("eip155:1", &json!({})));
        assert!(!is_valid_scope("eip155:1", &json!({ "methods": [] })));
        assert!(!is_valid_scope("eip155:1", &json!({ "notifications": [] })));
        assert!(is_valid_scope("eip155:1", &json!({ "methods": [], "notifications": [] })));
    }

    #[test]
    fn rejects_empty_names() {
        assert!(!is_valid_scope("eip155:1", &json!({ "methods": [""], "notifications": [] })));
        assert!(!is_valid_scope("eip155:1", &json!({ "methods": [], "notifications": [""] })));
        assert!(!is_valid_scope("eip155:1", &json!({ "methods": [1], "notifications": [] })));
    }

    #[test]
    fn rejects_invalid_scope_strings() {
        let object = json!({ "methods": [], "notifications": [] });
        assert!(!is_valid_scope("", &object));
        assert!(!is_valid_scope("not a scope", &object));
        assert!(!is_valid_scope("eip155:1:0xdead", &object));
    }

    #[test]
    fn nested_scopes_share_the_namespace() {
        let mixed = json!({
            "methods": [],
            "notifications": [],
            "scopes": ["eip155:5", "bip122:000000000019d6689c085ae165831e93"],
        });
        assert!(!is_valid_scope("eip155", &mixed));

        let same = json!({ "methods": [], "notifications": [], "scopes": ["eip155:5", "eip155:64"] });
        assert!(is_valid_scope("eip155", &same));

        let not_chain_ids = json!({ "methods": [], "notifications": [], "scopes": ["eip155"] });
        assert!(!is_valid_scope("eip155", &not_chain_ids));
    }

    #[test]
    fn chain_id_keys_cannot_nest_scopes() {
        let nested = json!({ "methods": [], "notifications": [], "scopes": ["eip155:5"] });
        assert!(!is_valid_scope("eip155:1", &nested));

        let empty = json!({ "methods": [], "notifications": [], "scopes": [] });
        assert!(is_valid_scope("eip155:1", &empty));
    }

    #[test]
    fn typed_objects_follow_the_same_rules() {
        let object = ScopeObject::new(["eth_call"], ["eth_subscription"]);
        assert!(is_valid_scope("eip155:1", &object));
        assert!(!is_valid_scope("eip155:1", &object.clone().with_scopes(["eip155:5"])));
        assert!(is_valid_scope("eip155", &object.with_scopes(["eip155:5"])));
    }

    #[test]
    fn validate_scopes_drops_invalid_entries() {
        let required: RawScopesObject = [
            ("eip155:1".to_string(), valid_with_accounts()),
            ("eip155:64".to_string(), json!({})),
        ]
        .into();
        let optional: RawScopesObject = [
            ("eip155:2".to_string(), json!({})),
            ("eip155:5".to_string(), valid_with_accounts()),
        ]
        .into();

        let ValidScopes { valid_required_scopes, valid_optional_scopes } =
            validate_scopes(&required, &optional);

        let expected: ScopeObject = serde_json::from_value(valid_with_accounts()).unwrap();
        assert_eq!(valid_required_scopes, ScopesObject::from([("eip155:1".into(), expected.clone())]));
        assert_eq!(valid_optional_scopes, ScopesObject::from([("eip155:5".into(), expected)]));
    }

    #[test]
    fn validate_scopes_may_return_nothing() {
        let required: RawScopesObject = [("foo".to_string(), json!({}))].into();
        let valid = validate_scopes(&required, &RawScopesObject::new());
        assert_eq!(valid, ValidScopes::default());
    }
}
