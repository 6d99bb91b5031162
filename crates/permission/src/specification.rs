use crate::{
    CAIP25_CAVEAT_TYPE, CAIP25_ENDOWMENT_PERMISSION, Caip25Error,
    permission::{PermissionConstraint, PermissionSpecification, PermissionType},
};
use multichain_core::scope::{ProcessedScopes, RawScopesObject, ScopesObject, process_scopes};
use serde_json::Value;

/// The `endowment:caip25` permission.
///
/// The permission carries no endowment, it only stores the authorized scopes in its single
/// `authorizedScopes` caveat.
#[derive(Clone, Copy, Debug, Default)]
#[non_exhaustive]
pub struct Caip25EndowmentSpecification;

impl Caip25EndowmentSpecification {
    pub fn new() -> Self {
        Self
    }

    /// Endowment permissions return nothing to the requester.
    pub fn endowment_getter(&self) -> Option<Value> {
        None
    }
}

impl PermissionSpecification for Caip25EndowmentSpecification {
    type Error = Caip25Error;

    fn permission_type(&self) -> PermissionType {
        PermissionType::Endowment
    }

    fn target_name(&self) -> &'static str {
        CAIP25_ENDOWMENT_PERMISSION
    }

    fn allowed_caveats(&self) -> &'static [&'static str] {
        &[CAIP25_CAVEAT_TYPE]
    }

    fn validator(&self, permission: &PermissionConstraint) -> Result<(), Caip25Error> {
        let caveat = match permission.caveats.as_deref() {
            Some([caveat]) if caveat.caveat_type == CAIP25_CAVEAT_TYPE => caveat,
            _ => return Err(Caip25Error::InvalidCaveats),
        };

        let (Some(required), Some(optional)) =
            (caveat.value.get("requiredScopes"), caveat.value.get("optionalScopes"))
        else {
            return Err(Caip25Error::InvalidCaveatValue);
        };

        let (Ok(required), Ok(optional)) = (
            serde_json::from_value::<RawScopesObject>(required.clone()),
            serde_json::from_value::<RawScopesObject>(optional.clone()),
        ) else {
            return Err(Caip25Error::InvalidCaveatValue);
        };

        let ProcessedScopes { flattened_required_scopes, flattened_optional_scopes } =
            process_scopes(&required, &optional);

        let is_normalized = typed(required).is_some_and(|s| s == flattened_required_scopes) &&
            typed(optional).is_some_and(|s| s == flattened_optional_scopes);
        if !is_normalized {
            debug!(
                target: "multichain::permission",
                invoker = %permission.invoker,
                "caveat value is not normalized"
            );
            return Err(Caip25Error::NonNormalizedCaveatValue);
        }

        Ok(())
    }
}

fn typed(raw: RawScopesObject) -> Option<ScopesObject> {
    serde_json::from_value(Value::Object(raw.into_iter().collect())).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::Caveat;
    use serde_json::json;

    fn permission(caveats: Option<Vec<Caveat>>) -> PermissionConstraint {
        PermissionConstraint {
            parent_capability: CAIP25_ENDOWMENT_PERMISSION.to_string(),
            invoker: "https://dapp.example".to_string(),
            caveats,
        }
    }

    fn authorized_scopes(value: Value) -> Option<Vec<Caveat>> {
        Some(vec![Caveat::new(CAIP25_CAVEAT_TYPE, value)])
    }

    #[test]
    fn describes_the_endowment() {
        let spec = Caip25EndowmentSpecification::new();
        assert_eq!(spec.permission_type(), PermissionType::Endowment);
        assert_eq!(spec.target_name(), "endowment:caip25");
        assert_eq!(spec.allowed_caveats(), ["authorizedScopes"]);
        assert_eq!(spec.endowment_getter(), None);
    }

    #[test]
    fn accepts_normalized_value() {
        let caveats = authorized_scopes(json!({
            "requiredScopes": {
                "eip155:1": {
                    "methods": ["eth_call"],
                    "notifications": [],
                    "accounts": ["eip155:1:0x5cfe73b6021e818b776b421b1c4db2474086a7e1"],
                },
            },
            "optionalScopes": {},
            "sessionProperties": {},
        }));
        assert_eq!(Caip25EndowmentSpecification.validator(&permission(caveats)), Ok(()));
    }

    #[test]
    fn requires_a_single_authorized_scopes_caveat() {
        let spec = Caip25EndowmentSpecification;
        let value = json!({ "requiredScopes": {}, "optionalScopes": {} });

        assert_eq!(spec.validator(&permission(None)), Err(Caip25Error::InvalidCaveats));
        assert_eq!(spec.validator(&permission(Some(vec![]))), Err(Caip25Error::InvalidCaveats));
        assert_eq!(
            spec.validator(&permission(Some(vec![Caveat::new(
                "restrictReturnedAccounts",
                value.clone()
            )]))),
            Err(Caip25Error::InvalidCaveats)
        );
        assert_eq!(
            spec.validator(&permission(Some(vec![
                Caveat::new(CAIP25_CAVEAT_TYPE, value.clone()),
                Caveat::new(CAIP25_CAVEAT_TYPE, value),
            ]))),
            Err(Caip25Error::InvalidCaveats)
        );
    }

    #[test]
    fn requires_both_scope_maps() {
        let spec = Caip25EndowmentSpecification;
        assert_eq!(
            spec.validator(&permission(authorized_scopes(json!({ "requiredScopes": {} })))),
            Err(Caip25Error::InvalidCaveatValue)
        );
        assert_eq!(
            spec.validator(&permission(authorized_scopes(json!({ "optionalScopes": {} })))),
            Err(Caip25Error::InvalidCaveatValue)
        );
        assert_eq!(
            spec.validator(&permission(authorized_scopes(
                json!({ "requiredScopes": [], "optionalScopes": {} })
            ))),
            Err(Caip25Error::InvalidCaveatValue)
        );
    }

    #[test]
    fn rejects_non_normalized_value() {
        let spec = Caip25EndowmentSpecification;

        // namespace declarations must already be flattened
        let nested = authorized_scopes(json!({
            "requiredScopes": {
                "eip155": { "scopes": ["eip155:1"], "methods": [], "notifications": [] },
            },
            "optionalScopes": {},
        }));
        assert_eq!(
            spec.validator(&permission(nested)),
            Err(Caip25Error::NonNormalizedCaveatValue)
        );

        // invalid entries would be dropped on re-processing
        let invalid = authorized_scopes(json!({
            "requiredScopes": {},
            "optionalScopes": {
                "eip155:1": { "methods": [""], "notifications": [] },
            },
        }));
        assert_eq!(
            spec.validator(&permission(invalid)),
            Err(Caip25Error::NonNormalizedCaveatValue)
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            Caip25Error::InvalidCaveats.to_string(),
            "endowment:caip25 error: Invalid caveats. There must be a single caveat of type \"authorizedScopes\"."
        );
        assert_eq!(
            Caip25Error::NonNormalizedCaveatValue.to_string(),
            "endowment:caip25 error: Received non-normalized value for caveat of type \"authorizedScopes\"."
        );
    }
}
