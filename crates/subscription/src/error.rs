use std::fmt;

/// Failure to tear down a chain subscription manager.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DestroyError {
    message: String,
}

impl DestroyError {
    pub fn new(message: impl fmt::Display) -> Self {
        Self { message: message.to_string() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionError {
    #[error("scope {0:?} is not an eip155 chain id")]
    UnsupportedScope(String),
    #[error("no network client for chain {chain_id} of scope {scope:?}")]
    NetworkClientNotFound { scope: String, chain_id: String },
    #[error("network client {0:?} is unavailable")]
    NetworkClientUnavailable(String),
    #[error("failed to destroy subscriptions of scope {scope:?}: {source}")]
    Destroy {
        scope: String,
        #[source]
        source: DestroyError,
    },
}
