use alloy_chains::Chain;
use multichain_core::{
    KnownCaipNamespace,
    caip::{parse_eip155_reference, to_hex_chain_id},
    scope::parse_scope_string,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScopeKind {
    Namespace,
    ChainId,
    Invalid,
}

/// What a scope string denotes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeInfo {
    pub scope: String,
    pub kind: ScopeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Whether the wallet knows the namespace.
    pub known_namespace: bool,
    /// Set for well-formed `eip155` chain ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex_chain_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
}

pub fn parse_scope(scope: &str) -> ScopeInfo {
    let parsed = parse_scope_string(scope);
    let kind = if parsed.is_chain_id() {
        ScopeKind::ChainId
    } else if parsed.is_namespace() {
        ScopeKind::Namespace
    } else {
        ScopeKind::Invalid
    };

    let chain_id = match (parsed.namespace, parsed.reference) {
        (Some(namespace), Some(reference)) if namespace == KnownCaipNamespace::Eip155.as_str() => {
            parse_eip155_reference(reference).ok()
        }
        _ => None,
    };

    ScopeInfo {
        scope: scope.to_string(),
        kind,
        namespace: parsed.namespace.map(str::to_string),
        reference: parsed.reference.map(str::to_string),
        known_namespace: parsed.namespace.and_then(KnownCaipNamespace::from_namespace).is_some(),
        hex_chain_id: chain_id.map(to_hex_chain_id),
        chain: chain_id.map(|id| Chain::from_id(id).to_string()),
    }
}
