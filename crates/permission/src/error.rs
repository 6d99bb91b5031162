/// Errors returned by the `endowment:caip25` validator.
///
/// These indicate corrupted or tampered permission state rather than a user-facing condition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Caip25Error {
    #[error(
        "endowment:caip25 error: Invalid caveats. There must be a single caveat of type \"authorizedScopes\"."
    )]
    InvalidCaveats,
    #[error(
        "endowment:caip25 error: Received invalid value for caveat of type \"authorizedScopes\"."
    )]
    InvalidCaveatValue,
    #[error(
        "endowment:caip25 error: Received non-normalized value for caveat of type \"authorizedScopes\"."
    )]
    NonNormalizedCaveatValue,
}
