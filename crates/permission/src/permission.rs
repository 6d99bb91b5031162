//! The subset of the permission system's data model this crate interacts with.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of a permission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionType {
    /// Gates access to an RPC method.
    RestrictedMethod,
    /// Grants a capability without returning a value to the requester.
    Endowment,
}

/// A constraint attached to a granted permission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caveat {
    #[serde(rename = "type")]
    pub caveat_type: String,
    pub value: Value,
}

impl Caveat {
    pub fn new(caveat_type: impl Into<String>, value: Value) -> Self {
        Self { caveat_type: caveat_type.into(), value }
    }
}

/// A permission granted to an origin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionConstraint {
    /// The permission's target, e.g. `endowment:caip25`.
    pub parent_capability: String,
    /// The origin holding the permission.
    pub invoker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caveats: Option<Vec<Caveat>>,
}

/// The contract a permission specification fulfils towards the permission system.
pub trait PermissionSpecification {
    /// The error returned by [`validator`](Self::validator).
    type Error;

    fn permission_type(&self) -> PermissionType;

    fn target_name(&self) -> &'static str;

    /// Caveat types that may be attached to the permission.
    fn allowed_caveats(&self) -> &'static [&'static str];

    /// Called whenever the permission is constructed or its caveats change.
    fn validator(&self, permission: &PermissionConstraint) -> Result<(), Self::Error>;
}
