use super::{
    constants::{
        KNOWN_EIP155_NOTIFICATIONS, KNOWN_EIP155_RPC_METHODS, KNOWN_WALLET_EIP155_RPC_METHODS,
        KNOWN_WALLET_RPC_METHODS,
    },
    parse::parse_scope_string,
};
use crate::caip::{CaipAccountId, KnownCaipNamespace, parse_eip155_reference};
use alloy_primitives::{Address, ChainId};
use auto_impl::auto_impl;

/// Wallet-provided chain capability predicates.
#[auto_impl(&, Box, Arc)]
pub trait ChainSupport {
    /// Whether the wallet currently has a network client for `chain_id`.
    fn is_chain_id_supported(&self, chain_id: ChainId) -> bool;

    /// Whether the wallet could add a network client for `chain_id`, e.g. a well known chain
    /// that is not configured yet.
    fn is_chain_id_supportable(&self, chain_id: ChainId) -> bool;
}

/// [`ChainSupport`] backed by two closures.
#[derive(Clone, Copy, Debug)]
pub struct ChainPredicates<S, P> {
    pub is_chain_id_supported: S,
    pub is_chain_id_supportable: P,
}

impl<S, P> ChainSupport for ChainPredicates<S, P>
where
    S: Fn(ChainId) -> bool,
    P: Fn(ChainId) -> bool,
{
    fn is_chain_id_supported(&self, chain_id: ChainId) -> bool {
        (self.is_chain_id_supported)(chain_id)
    }

    fn is_chain_id_supportable(&self, chain_id: ChainId) -> bool {
        (self.is_chain_id_supportable)(chain_id)
    }
}

/// Returns true if the wallet supports `scope`.
///
/// The bare `eip155` and `wallet` namespaces and the `wallet:eip155` scope are always supported.
/// `eip155` chain ids are supported if `is_chain_id_supported` says so.
pub fn is_supported_scope_string(
    scope: &str,
    is_chain_id_supported: impl Fn(ChainId) -> bool,
) -> bool {
    let parsed = parse_scope_string(scope);
    let Some(namespace) = parsed.namespace.and_then(KnownCaipNamespace::from_namespace) else {
        return false;
    };
    match (namespace, parsed.reference) {
        (KnownCaipNamespace::Wallet, None) => true,
        (KnownCaipNamespace::Wallet, Some(reference)) => {
            reference == KnownCaipNamespace::Eip155.as_str()
        }
        (KnownCaipNamespace::Eip155, None) => true,
        (KnownCaipNamespace::Eip155, Some(reference)) => {
            parse_eip155_reference(reference).is_ok_and(is_chain_id_supported)
        }
        _ => false,
    }
}

/// Returns true if `method` can be called on `scope`.
pub fn is_supported_method(scope: &str, method: &str) -> bool {
    let parsed = parse_scope_string(scope);
    let Some(namespace) = parsed.namespace.and_then(KnownCaipNamespace::from_namespace) else {
        return false;
    };
    match namespace {
        KnownCaipNamespace::Wallet => match parsed.reference {
            None => KNOWN_WALLET_RPC_METHODS.contains(&method),
            Some(reference) if reference == KnownCaipNamespace::Eip155.as_str() => {
                KNOWN_WALLET_EIP155_RPC_METHODS.contains(&method)
            }
            Some(_) => false,
        },
        KnownCaipNamespace::Eip155 => KNOWN_EIP155_RPC_METHODS.contains(&method),
        KnownCaipNamespace::Bip122 | KnownCaipNamespace::Solana => false,
    }
}

/// Returns true if `notification` can be emitted on `scope`.
pub fn is_supported_notification(scope: &str, notification: &str) -> bool {
    let namespace =
        parse_scope_string(scope).namespace.and_then(KnownCaipNamespace::from_namespace);
    match namespace {
        Some(KnownCaipNamespace::Eip155) => KNOWN_EIP155_NOTIFICATIONS.contains(&notification),
        _ => false,
    }
}

/// Returns true if `account` is a CAIP-10 account id the wallet can hold.
///
/// Only `eip155` and `wallet:eip155` accounts with a 20 byte hex address are supported.
pub fn is_supported_account(account: &str) -> bool {
    let Ok(account) = account.parse::<CaipAccountId>() else {
        return false;
    };
    match KnownCaipNamespace::from_namespace(&account.chain_id.namespace) {
        Some(KnownCaipNamespace::Eip155) => is_evm_address(&account.address),
        Some(KnownCaipNamespace::Wallet) => {
            account.chain_id.reference == KnownCaipNamespace::Eip155.as_str() &&
                is_evm_address(&account.address)
        }
        _ => false,
    }
}

fn is_evm_address(address: &str) -> bool {
    address.starts_with("0x") && address.parse::<Address>().is_ok()
}
