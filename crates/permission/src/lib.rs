//! The `endowment:caip25` permission: caveat value, validator, caveat mutators and the
//! single-chain adapters built on top of it.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod adapters;
pub use adapters::{
    WALLET_EIP155_SCOPE, add_permitted_eth_chain_id, get_eth_accounts,
    get_permitted_eth_chain_ids, set_eth_accounts, set_permitted_eth_chain_ids,
};

mod caveat;
pub use caveat::{Caip25CaveatValue, get_session_scopes, merge_caveat_values};

mod error;
pub use error::Caip25Error;

pub mod mutators;
pub use mutators::{
    CaveatMutator, CaveatMutatorKind, CaveatMutatorOperation, CaveatMutatorResult,
    caveat_mutator_for, mutate, remove_account, remove_scope,
};

pub mod permission;

mod specification;
pub use specification::Caip25EndowmentSpecification;

/// The target name of the CAIP-25 endowment permission.
pub const CAIP25_ENDOWMENT_PERMISSION: &str = "endowment:caip25";

/// The type of the caveat holding the authorized scopes.
pub const CAIP25_CAVEAT_TYPE: &str = "authorizedScopes";
