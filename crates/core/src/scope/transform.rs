use super::{
    parse::parse_scope_string,
    types::{ScopeObject, ScopesObject},
};
use itertools::Itertools;

/// Expands a namespace-level declaration into one entry per nested chain id.
///
/// Each nested chain id inherits the namespace's methods, notifications, accounts and RPC
/// fields. Chain id keys, and namespaces without a nested `scopes` list, pass through unchanged.
pub fn flatten_scope(scope: &str, scope_object: &ScopeObject) -> ScopesObject {
    match &scope_object.scopes {
        Some(nested) if parse_scope_string(scope).is_namespace() => {
            let inherited = ScopeObject { scopes: None, ..scope_object.clone() };
            nested.iter().map(|chain_id| (chain_id.clone(), inherited.clone())).collect()
        }
        _ => ScopesObject::from([(scope.to_string(), scope_object.clone())]),
    }
}

/// Unions two scope objects declared for the same scope.
///
/// List order follows `a` then `b`, duplicates are dropped.
pub fn merge_scope_object(a: &ScopeObject, b: &ScopeObject) -> ScopeObject {
    ScopeObject {
        scopes: None,
        methods: union(&a.methods, &b.methods),
        notifications: union(&a.notifications, &b.notifications),
        accounts: union(&a.accounts, &b.accounts),
        rpc_documents: union_optional(a.rpc_documents.as_deref(), b.rpc_documents.as_deref()),
        rpc_endpoints: union_optional(a.rpc_endpoints.as_deref(), b.rpc_endpoints.as_deref()),
    }
}

/// Merges two scope sets, yielding one entry per distinct key of either input.
pub fn merge_scopes(a: &ScopesObject, b: &ScopesObject) -> ScopesObject {
    let mut merged = a.clone();
    for (scope, object_b) in b {
        merged
            .entry(scope.clone())
            .and_modify(|object_a| *object_a = merge_scope_object(object_a, object_b))
            .or_insert_with(|| object_b.clone());
    }
    merged
}

/// Flattens every entry of `scopes` and merges the results.
pub fn flatten_merge_scopes(scopes: &ScopesObject) -> ScopesObject {
    scopes
        .iter()
        .fold(ScopesObject::new(), |acc, (scope, object)| {
            merge_scopes(&acc, &flatten_scope(scope, object))
        })
}

fn union(a: &[String], b: &[String]) -> Vec<String> {
    a.iter().chain(b).unique().cloned().collect()
}

fn union_optional(a: Option<&[String]>, b: Option<&[String]>) -> Option<Vec<String>> {
    (a.is_some() || b.is_some()).then(|| union(a.unwrap_or_default(), b.unwrap_or_default()))
}
