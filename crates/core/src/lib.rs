//! # multichain-core
//!
//! CAIP-25 scope negotiation for multichain wallet sessions.
//!
//! A requesting origin asks for a set of scopes, each a CAIP namespace or chain id with the
//! methods and notifications it wants to use. This crate validates those requests, expands
//! namespace-level declarations into concrete chain ids, and sorts the result by what the wallet
//! can serve.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate tracing;

/// CAIP-2 and CAIP-10 identifiers
pub mod caip;

pub mod scope;

pub use caip::{CaipAccountId, CaipChainId, CaipError, KnownCaipNamespace};
