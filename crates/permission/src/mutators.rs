//! Caveat mutators, applied by the permission system when a scope or account is removed from
//! every permission that references it.

use crate::{
    adapters::{eth_account_address, get_eth_accounts, is_eth_scope},
    caveat::Caip25CaveatValue,
};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// What the permission system must do with a caveat after a mutator ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaveatMutatorOperation {
    Noop,
    UpdateValue,
    RevokePermission,
}

/// The outcome of a caveat mutator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "value", rename_all = "camelCase")]
pub enum CaveatMutatorResult {
    Noop,
    /// Replace the caveat value.
    UpdateValue(Caip25CaveatValue),
    RevokePermission,
}

impl CaveatMutatorResult {
    pub fn operation(&self) -> CaveatMutatorOperation {
        match self {
            Self::Noop => CaveatMutatorOperation::Noop,
            Self::UpdateValue(_) => CaveatMutatorOperation::UpdateValue,
            Self::RevokePermission => CaveatMutatorOperation::RevokePermission,
        }
    }

    /// Returns the updated caveat value, if any.
    pub fn value(&self) -> Option<&Caip25CaveatValue> {
        match self {
            Self::UpdateValue(value) => Some(value),
            _ => None,
        }
    }
}

/// Removes `target` from the authorized scopes.
///
/// A required scope cannot be removed on its own, so removing one revokes the permission.
pub fn remove_scope(target: &str, value: &Caip25CaveatValue) -> CaveatMutatorResult {
    if value.required_scopes.contains_key(target) {
        return CaveatMutatorResult::RevokePermission;
    }

    if value.optional_scopes.contains_key(target) {
        let mut updated = value.clone();
        updated.optional_scopes.remove(target);
        return CaveatMutatorResult::UpdateValue(updated);
    }

    CaveatMutatorResult::Noop
}

/// Removes the Ethereum account `target` from every eth scope.
///
/// Only entries of `target` are dropped, every other account stays in the scopes that granted
/// it. Revokes the permission if no eth account remains.
pub fn remove_account(target: &str, value: &Caip25CaveatValue) -> CaveatMutatorResult {
    let Ok(target) = target.parse::<Address>() else {
        return CaveatMutatorResult::Noop;
    };

    let mut updated = value.clone();
    let mut removed = false;
    for (scope, object) in
        updated.required_scopes.iter_mut().chain(updated.optional_scopes.iter_mut())
    {
        if !is_eth_scope(scope) {
            continue;
        }
        let len = object.accounts.len();
        object.accounts.retain(|account| eth_account_address(account) != Some(target));
        removed |= object.accounts.len() != len;
    }

    if !removed {
        return CaveatMutatorResult::Noop;
    }
    if get_eth_accounts(&updated).is_empty() {
        return CaveatMutatorResult::RevokePermission;
    }
    CaveatMutatorResult::UpdateValue(updated)
}

/// A caveat mutator: takes the removed target and the current caveat value.
pub type CaveatMutator = fn(&str, &Caip25CaveatValue) -> CaveatMutatorResult;

/// The kinds of removal the `authorizedScopes` caveat reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaveatMutatorKind {
    /// A scope (e.g. a network) was removed; the target is a scope string.
    Scope,
    /// An account was removed; the target is a hex address.
    Account,
}

impl CaveatMutatorKind {
    pub const ALL: [Self; 2] = [Self::Scope, Self::Account];
}

/// Returns the mutator registered for `kind`.
pub fn caveat_mutator_for(kind: CaveatMutatorKind) -> CaveatMutator {
    match kind {
        CaveatMutatorKind::Scope => remove_scope,
        CaveatMutatorKind::Account => remove_account,
    }
}

/// Applies the mutator registered for `kind`.
pub fn mutate(
    kind: CaveatMutatorKind,
    target: &str,
    value: &Caip25CaveatValue,
) -> CaveatMutatorResult {
    let result = caveat_mutator_for(kind)(target, value);
    trace!(
        target: "multichain::permission",
        ?kind,
        removed = %target,
        operation = ?result.operation(),
        "mutated caveat"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use multichain_core::scope::{ScopeObject, ScopesObject};
    use serde_json::json;

    const ALICE: &str = "0x5cfE73b6021E818B776b421B1c4Db2474086a7e1";
    const BOB: &str = "0xab16a96D359eC26a11e2C2b3d8f8B8942d5Bfcdb";

    fn value() -> Caip25CaveatValue {
        Caip25CaveatValue::new(
            ScopesObject::from([(
                "eip155:1".to_string(),
                ScopeObject::new(["eth_call"], Vec::<String>::new())
                    .with_accounts([format!("eip155:1:{ALICE}"), format!("eip155:1:{BOB}")]),
            )]),
            ScopesObject::from([(
                "eip155:5".to_string(),
                ScopeObject::new(["eth_call"], Vec::<String>::new())
                    .with_accounts([format!("eip155:5:{ALICE}")]),
            )]),
        )
    }

    #[test]
    fn removing_required_scope_revokes() {
        let result = remove_scope("eip155:1", &value());
        assert_eq!(result, CaveatMutatorResult::RevokePermission);
        assert_eq!(result.operation(), CaveatMutatorOperation::RevokePermission);
        assert!(result.value().is_none());
    }

    #[test]
    fn removing_optional_scope_updates() {
        let result = remove_scope("eip155:5", &value());
        assert_eq!(result.operation(), CaveatMutatorOperation::UpdateValue);

        let updated = result.value().unwrap();
        assert_eq!(updated.required_scopes, value().required_scopes);
        assert!(updated.optional_scopes.is_empty());
    }

    #[test]
    fn removing_unknown_scope_is_noop() {
        assert_eq!(remove_scope("eip155:10", &value()), CaveatMutatorResult::Noop);
    }

    #[test]
    fn removes_account_everywhere() {
        let result = remove_account(&ALICE.to_lowercase(), &value());
        let updated = result.value().unwrap();
        let bob: Address = BOB.parse().unwrap();
        assert_eq!(get_eth_accounts(updated), [bob]);
        assert_eq!(updated.required_scopes["eip155:1"].accounts, [format!("eip155:1:{BOB}")]);
        assert!(updated.optional_scopes["eip155:5"].accounts.is_empty());
    }

    #[test]
    fn removing_account_grants_nothing_new() {
        let mut value = value();
        value.optional_scopes.insert("eip155:10".to_string(), ScopeObject::default());
        value.optional_scopes.insert(
            "bip122:000000000019d6689c085ae165831e93".to_string(),
            ScopeObject::default().with_accounts([
                "bip122:000000000019d6689c085ae165831e93:128Lkh3S7CkDTBZ8W7BbpsN3YYizJMp8p6",
            ]),
        );

        let result = remove_account(ALICE, &value);
        let updated = result.value().unwrap();
        assert!(updated.optional_scopes["eip155:5"].accounts.is_empty());
        assert!(updated.optional_scopes["eip155:10"].accounts.is_empty());
        assert_eq!(
            updated.optional_scopes["bip122:000000000019d6689c085ae165831e93"],
            value.optional_scopes["bip122:000000000019d6689c085ae165831e93"]
        );
        assert_eq!(updated.required_scopes["eip155:1"].accounts, [format!("eip155:1:{BOB}")]);
    }

    #[test]
    fn removing_last_account_revokes() {
        let value = remove_account(BOB, &value()).value().cloned().unwrap();
        assert_eq!(remove_account(ALICE, &value), CaveatMutatorResult::RevokePermission);
    }

    #[test]
    fn removing_unknown_account_is_noop() {
        assert_eq!(
            remove_account("0x0000000000000000000000000000000000000001", &value()),
            CaveatMutatorResult::Noop
        );
        assert_eq!(remove_account("not an address", &value()), CaveatMutatorResult::Noop);
    }

    #[test]
    fn dispatches_by_kind() {
        assert_eq!(
            mutate(CaveatMutatorKind::Scope, "eip155:1", &value()),
            CaveatMutatorResult::RevokePermission
        );
        assert_eq!(
            mutate(CaveatMutatorKind::Account, "eip155:1", &value()),
            CaveatMutatorResult::Noop
        );
        for kind in CaveatMutatorKind::ALL {
            assert_eq!(mutate(kind, "", &value()).operation(), CaveatMutatorOperation::Noop);
        }
    }

    #[test]
    fn serializes_operation_and_value() {
        assert_eq!(
            serde_json::to_value(CaveatMutatorResult::RevokePermission).unwrap(),
            json!({ "operation": "revokePermission" })
        );
        let update = serde_json::to_value(remove_scope("eip155:5", &value())).unwrap();
        assert_eq!(update["operation"], "updateValue");
        assert_eq!(update["value"]["optionalScopes"], json!({}));
    }
}
