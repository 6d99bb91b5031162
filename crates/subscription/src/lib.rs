//! # multichain-subscription
//!
//! Routes chain notifications to the origins subscribed to a scope.
//!
//! Each subscribed scope is served by one chain subscription manager, created through the
//! [`NetworkClientRegistry`] on the first subscription and destroyed when the last origin
//! unsubscribes. Every chain notification is wrapped in a `wallet_notify` message carrying its
//! scope and re-emitted once per subscribed origin.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod emitter;
pub use emitter::{EventEmitter, ListenerId};

mod error;
pub use error::{DestroyError, SubscriptionError};

mod manager;
pub use manager::{DomainNotification, MultichainSubscriptionManager};

mod registry;
pub use registry::{ChainSubscriptionManager, NetworkClientRegistry};
