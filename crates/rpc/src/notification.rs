//! JSON-RPC notification types
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The method name used to wrap scoped chain notifications.
pub const WALLET_NOTIFY: &str = "wallet_notify";

/// The JSON-RPC version marker
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    #[default]
    #[serde(rename = "2.0")]
    V2,
}

/// A notification emitted by a chain, for example an `eth_subscription` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub method: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub params: Value,
}

impl Notification {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self { method: method.into(), params }
    }
}

/// Represents the `params` field of a `wallet_notify` event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletNotifyParams {
    /// The CAIP-2 chain id the notification originated from.
    pub scope: String,
    pub notification: Notification,
}

/// A chain notification relabeled with the scope it was emitted for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletNotification {
    method: String,
    pub params: WalletNotifyParams,
}

impl WalletNotification {
    /// Wraps `notification` as a `wallet_notify` message for `scope`.
    pub fn new(scope: impl Into<String>, notification: Notification) -> Self {
        Self {
            method: WALLET_NOTIFY.to_string(),
            params: WalletNotifyParams { scope: scope.into(), notification },
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn scope(&self) -> &str {
        &self.params.scope
    }

    /// Returns the wire representation, with the `jsonrpc` version marker.
    pub fn into_wire(self) -> WireNotification<Self> {
        WireNotification::new(self)
    }
}

/// A notification as sent over the transport, tagged with the `jsonrpc` version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireNotification<T> {
    pub jsonrpc: Version,
    #[serde(flatten)]
    pub inner: T,
}

impl<T> WireNotification<T> {
    pub fn new(inner: T) -> Self {
        Self { jsonrpc: Version::V2, inner }
    }
}
