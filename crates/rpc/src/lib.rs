//! # multichain-rpc
//!
//! JSON-RPC types shared by the multichain API crates.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// JSON-RPC error bindings
pub mod error;

/// Notification payloads
pub mod notification;

pub use error::{ErrorCode, RpcError};
pub use notification::{
    Notification, Version, WALLET_NOTIFY, WalletNotification, WalletNotifyParams,
    WireNotification,
};
