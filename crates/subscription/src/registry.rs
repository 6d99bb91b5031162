use crate::{emitter::EventEmitter, error::DestroyError};
use multichain_rpc::Notification;
use std::sync::Arc;

/// Forwards the subscription events of a single chain.
///
/// Typically backed by the chain's block tracker and provider.
#[auto_impl::auto_impl(&, Box, Arc)]
pub trait ChainSubscriptionManager: Send + Sync {
    /// The `notification` events of the chain.
    fn events(&self) -> &EventEmitter<Notification>;

    /// Tears down the chain's subscriptions once no origin is subscribed anymore.
    fn destroy(&self) -> Result<(), DestroyError> {
        Ok(())
    }
}

/// Resolves chains to live network clients.
pub trait NetworkClientRegistry {
    /// A provider and block tracker pair.
    type Client;

    /// Returns the id of the network client serving the `0x`-prefixed hex chain id.
    fn find_network_client_id_by_chain_id(&self, hex_chain_id: &str) -> Option<String>;

    fn get_network_client_by_id(&self, network_client_id: &str) -> Option<Self::Client>;

    /// Builds the subscription manager for a network client.
    fn create_subscription_manager(
        &self,
        client: Self::Client,
    ) -> Arc<dyn ChainSubscriptionManager>;
}
