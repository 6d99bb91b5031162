//! Views of a CAIP-25 caveat value in terms of the single-chain `eth_accounts` and
//! permitted-chains permissions.

use crate::caveat::Caip25CaveatValue;
use alloy_primitives::{Address, ChainId};
use itertools::Itertools;
use multichain_core::{
    CaipAccountId, CaipChainId, KnownCaipNamespace,
    scope::{ScopeObject, parse_scope_string},
};

/// The chain-agnostic scope under which eip155 wallet methods and accounts are granted.
pub const WALLET_EIP155_SCOPE: &str = "wallet:eip155";

/// Returns true for `eip155:<reference>` scopes and `wallet:eip155`.
pub fn is_eth_scope(scope: &str) -> bool {
    scope == WALLET_EIP155_SCOPE || eip155_chain_id(scope).is_some()
}

/// Returns the eip155 chain id named by `scope`, if any.
fn eip155_chain_id(scope: &str) -> Option<ChainId> {
    let parsed = parse_scope_string(scope);
    if parsed.namespace != Some(KnownCaipNamespace::Eip155.as_str()) {
        return None;
    }
    CaipChainId::new(parsed.namespace?, parsed.reference?).eip155_chain_id()
}

/// Returns the distinct Ethereum addresses granted under any eth scope, in order of appearance.
pub fn get_eth_accounts(value: &Caip25CaveatValue) -> Vec<Address> {
    value
        .scopes()
        .filter(|(scope, _)| is_eth_scope(scope))
        .flat_map(|(_, object)| &object.accounts)
        .filter_map(|account| eth_account_address(account))
        .unique()
        .collect()
}

/// Parses the Ethereum address of a CAIP-10 account id.
pub(crate) fn eth_account_address(account: &str) -> Option<Address> {
    account.parse::<CaipAccountId>().ok()?.address.parse().ok()
}

/// Replaces the accounts of every eth scope with `accounts`.
///
/// Scopes of other namespaces are left untouched.
pub fn set_eth_accounts(value: &Caip25CaveatValue, accounts: &[Address]) -> Caip25CaveatValue {
    let mut updated = value.clone();
    for (scope, object) in
        updated.required_scopes.iter_mut().chain(updated.optional_scopes.iter_mut())
    {
        if is_eth_scope(scope) {
            object.accounts = account_ids(scope, accounts);
        }
    }
    updated
}

/// Returns the distinct eip155 chain ids granted as required or optional scopes.
pub fn get_permitted_eth_chain_ids(value: &Caip25CaveatValue) -> Vec<ChainId> {
    value.scopes().filter_map(|(scope, _)| eip155_chain_id(scope)).unique().collect()
}

/// Grants `chain_id` as an optional scope, carrying over the currently granted eth accounts.
///
/// Returns the value unchanged if the chain is already granted.
pub fn add_permitted_eth_chain_id(
    value: &Caip25CaveatValue,
    chain_id: ChainId,
) -> Caip25CaveatValue {
    let accounts = get_eth_accounts(value);
    let mut updated = value.clone();
    insert_eth_scope(&mut updated, chain_id, &accounts);
    updated
}

/// Restricts the granted eip155 chains to exactly `chain_ids`.
///
/// Chains that are no longer permitted are removed from both scope maps, new chains are added as
/// optional scopes. Non-eip155 scopes are kept.
pub fn set_permitted_eth_chain_ids(
    value: &Caip25CaveatValue,
    chain_ids: &[ChainId],
) -> Caip25CaveatValue {
    let accounts = get_eth_accounts(value);
    let mut updated = value.clone();
    let keep = |scope: &String, _: &mut ScopeObject| {
        eip155_chain_id(scope).is_none_or(|chain_id| chain_ids.contains(&chain_id))
    };
    updated.required_scopes.retain(keep);
    updated.optional_scopes.retain(keep);

    for &chain_id in chain_ids {
        insert_eth_scope(&mut updated, chain_id, &accounts);
    }
    updated
}

fn insert_eth_scope(value: &mut Caip25CaveatValue, chain_id: ChainId, accounts: &[Address]) {
    let scope = CaipChainId::eip155(chain_id).to_string();
    if value.contains_scope(&scope) {
        return;
    }
    let object = ScopeObject::default().with_accounts(account_ids(&scope, accounts));
    value.optional_scopes.insert(scope, object);
}

fn account_ids(scope: &str, accounts: &[Address]) -> Vec<String> {
    accounts.iter().map(|address| format!("{scope}:{address}")).collect()
}
