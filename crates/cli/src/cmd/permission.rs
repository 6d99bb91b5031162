use eyre::{Result, WrapErr};
use multichain_permission::{
    Caip25CaveatValue, Caip25EndowmentSpecification, CaveatMutatorKind, CaveatMutatorResult,
    mutate,
    permission::{PermissionConstraint, PermissionSpecification},
};
use serde_json::Value;

/// Runs the `endowment:caip25` validator against a granted permission.
pub fn validate_permission(permission: Value) -> Result<()> {
    let permission: PermissionConstraint =
        serde_json::from_value(permission).wrap_err("invalid permission")?;

    let specification = Caip25EndowmentSpecification::new();
    if permission.parent_capability != specification.target_name() {
        eyre::bail!(
            "expected a `{}` permission, found `{}`",
            specification.target_name(),
            permission.parent_capability
        );
    }
    specification.validator(&permission)?;
    Ok(())
}

/// Applies the mutator for `kind` to an `authorizedScopes` caveat value.
pub fn mutate_caveat(
    kind: CaveatMutatorKind,
    target: &str,
    caveat: Value,
) -> Result<CaveatMutatorResult> {
    let value: Caip25CaveatValue =
        serde_json::from_value(caveat).wrap_err("invalid caveat value")?;
    Ok(mutate(kind, target, &value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use multichain_permission::CaveatMutatorOperation;
    use serde_json::json;

    const ACCOUNT: &str = "0x5cfe73b6021e818b776b421b1c4db2474086a7e1";

    fn caveat_value() -> Value {
        json!({
            "requiredScopes": {},
            "optionalScopes": {
                "eip155:1": {
                    "methods": ["eth_call"],
                    "notifications": [],
                    "accounts": [format!("eip155:1:{ACCOUNT}")],
                },
                "eip155:10": { "methods": [], "notifications": [], "accounts": [] },
            },
            "sessionProperties": {},
        })
    }

    fn permission(parent_capability: &str) -> Value {
        json!({
            "parentCapability": parent_capability,
            "invoker": "https://dapp.example",
            "caveats": [{ "type": "authorizedScopes", "value": caveat_value() }],
        })
    }

    #[test]
    fn validates_normalized_permission() {
        validate_permission(permission("endowment:caip25")).unwrap();
    }

    #[test]
    fn rejects_other_permissions() {
        let err = validate_permission(permission("eth_accounts")).unwrap_err();
        assert_eq!(err.to_string(), "expected a `endowment:caip25` permission, found `eth_accounts`");
    }

    #[test]
    fn rejects_missing_caveats() {
        let err = validate_permission(json!({
            "parentCapability": "endowment:caip25",
            "invoker": "https://dapp.example",
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Invalid caveats"), "{err}");
    }

    #[test]
    fn removes_optional_scope() {
        let result = mutate_caveat(CaveatMutatorKind::Scope, "eip155:10", caveat_value()).unwrap();
        assert_eq!(result.operation(), CaveatMutatorOperation::UpdateValue);
        let value = result.value().unwrap();
        assert!(!value.contains_scope("eip155:10"));
        assert!(value.contains_scope("eip155:1"));
    }

    #[test]
    fn removing_last_account_revokes() {
        let result = mutate_caveat(CaveatMutatorKind::Account, ACCOUNT, caveat_value()).unwrap();
        assert_eq!(result, CaveatMutatorResult::RevokePermission);
    }

    #[test]
    fn rejects_malformed_caveat_value() {
        let err = mutate_caveat(CaveatMutatorKind::Scope, "eip155:1", json!([])).unwrap_err();
        assert!(err.to_string().starts_with("invalid caveat value"), "{err}");
    }
}
