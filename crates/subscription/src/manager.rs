use crate::{
    emitter::{EventEmitter, ListenerId},
    error::SubscriptionError,
    registry::{ChainSubscriptionManager, NetworkClientRegistry},
};
use futures::channel::mpsc::UnboundedReceiver;
use multichain_config::MultichainConfig;
use multichain_core::{CaipChainId, caip::to_hex_chain_id};
use multichain_rpc::{Notification, WalletNotification};
use std::{
    collections::{BTreeMap, btree_map::Entry},
    fmt,
    sync::Arc,
};

/// A `wallet_notify` message addressed to the origin that subscribed to its scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainNotification {
    pub domain: String,
    pub notification: WalletNotification,
}

/// Subscription state of a single scope.
struct ScopeSubscriptions {
    manager: Arc<dyn ChainSubscriptionManager>,
    /// Listeners registered on the chain manager, per origin.
    listeners: BTreeMap<String, Vec<ListenerId>>,
    ref_count: usize,
}

/// Routes chain notifications to the origins subscribed to their scope.
///
/// Chain subscription managers are created lazily on the first subscription to a scope and
/// destroyed once the last origin unsubscribes.
pub struct MultichainSubscriptionManager<R> {
    registry: R,
    subscriptions: BTreeMap<String, ScopeSubscriptions>,
    notifications: Arc<EventEmitter<DomainNotification>>,
    dedupe: bool,
}

impl<R> fmt::Debug for MultichainSubscriptionManager<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultichainSubscriptionManager")
            .field("scopes", &self.subscriptions.keys().collect::<Vec<_>>())
            .field("dedupe", &self.dedupe)
            .finish_non_exhaustive()
    }
}

impl<R: NetworkClientRegistry> MultichainSubscriptionManager<R> {
    /// Creates a manager resolving chains through `registry`.
    ///
    /// Repeated subscriptions of the same origin to the same scope are deduplicated.
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            subscriptions: BTreeMap::new(),
            notifications: Arc::default(),
            dedupe: true,
        }
    }

    /// Creates a manager following the subscription settings of `config`.
    pub fn from_config(registry: R, config: &MultichainConfig) -> Self {
        Self::new(registry).with_dedupe(config.dedupe_subscriptions)
    }

    /// Sets whether repeated subscriptions of an origin to a scope are deduplicated.
    ///
    /// When disabled every `subscribe` call registers another listener and needs its own
    /// `unsubscribe`.
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Subscribes `domain` to the notifications of `scope`.
    pub fn subscribe(
        &mut self,
        scope: &str,
        domain: &str,
    ) -> Result<Arc<dyn ChainSubscriptionManager>, SubscriptionError> {
        let subscriptions = match self.subscriptions.entry(scope.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let manager = create_manager(&self.registry, scope)?;
                entry.insert(ScopeSubscriptions {
                    manager,
                    listeners: BTreeMap::new(),
                    ref_count: 0,
                })
            }
        };

        if self.dedupe && subscriptions.listeners.contains_key(domain) {
            trace!(target: "multichain::subscription", %scope, %domain, "already subscribed");
            return Ok(subscriptions.manager.clone());
        }

        let listener = {
            let notifications = self.notifications.clone();
            let scope = scope.to_string();
            let domain = domain.to_string();
            move |notification: &Notification| {
                notifications.emit(&DomainNotification {
                    domain: domain.clone(),
                    notification: WalletNotification::new(scope.clone(), notification.clone()),
                });
            }
        };
        let id = subscriptions.manager.events().on(listener);
        subscriptions.listeners.entry(domain.to_string()).or_default().push(id);
        subscriptions.ref_count += 1;

        trace!(
            target: "multichain::subscription",
            %scope,
            %domain,
            ref_count = subscriptions.ref_count,
            "subscribed"
        );
        Ok(subscriptions.manager.clone())
    }

    /// Unsubscribes `domain` from `scope`.
    ///
    /// Once no subscription to the scope remains its chain manager is destroyed and all state for
    /// the scope is dropped, even if destroying the chain manager fails.
    pub fn unsubscribe(&mut self, scope: &str, domain: &str) -> Result<(), SubscriptionError> {
        let Some(subscriptions) = self.subscriptions.get_mut(scope) else {
            return Ok(());
        };

        let Some(ids) = subscriptions.listeners.get_mut(domain) else {
            return Ok(());
        };
        if let Some(id) = ids.pop() {
            subscriptions.manager.events().off(id);
            subscriptions.ref_count = subscriptions.ref_count.saturating_sub(1);
        }
        if ids.is_empty() {
            subscriptions.listeners.remove(domain);
        }

        trace!(
            target: "multichain::subscription",
            %scope,
            %domain,
            ref_count = subscriptions.ref_count,
            "unsubscribed"
        );
        if subscriptions.ref_count > 0 {
            return Ok(());
        }

        let Some(subscriptions) = self.subscriptions.remove(scope) else { return Ok(()) };
        debug!(target: "multichain::subscription", %scope, "destroying chain subscription manager");
        subscriptions.manager.destroy().map_err(|source| {
            warn!(
                target: "multichain::subscription",
                %scope,
                %source,
                "failed to destroy chain subscription manager"
            );
            SubscriptionError::Destroy { scope: scope.to_string(), source }
        })
    }

    /// Unsubscribes every origin from every scope, returning the failed teardowns.
    pub fn unsubscribe_all(&mut self) -> Vec<SubscriptionError> {
        self.unsubscribe_matching(|_, _| true)
    }

    /// Unsubscribes every origin from `scope`, returning the failed teardowns.
    pub fn unsubscribe_scope(&mut self, scope: &str) -> Vec<SubscriptionError> {
        self.unsubscribe_matching(|s, _| s == scope)
    }

    /// Unsubscribes `domain` from every scope, returning the failed teardowns.
    pub fn unsubscribe_domain(&mut self, domain: &str) -> Vec<SubscriptionError> {
        self.unsubscribe_matching(|_, d| d == domain)
    }

    /// The `wallet_notify` messages routed to subscribed origins.
    pub fn notifications(&self) -> &EventEmitter<DomainNotification> {
        &self.notifications
    }

    /// Returns a stream of the `wallet_notify` messages routed from now on.
    pub fn notification_stream(&self) -> UnboundedReceiver<DomainNotification> {
        self.notifications.subscribe()
    }

    pub fn is_subscribed(&self, scope: &str, domain: &str) -> bool {
        self.subscriptions.get(scope).is_some_and(|s| s.listeners.contains_key(domain))
    }

    /// Returns the number of active subscriptions to `scope`.
    pub fn subscription_count(&self, scope: &str) -> usize {
        self.subscriptions.get(scope).map_or(0, |s| s.ref_count)
    }

    /// Returns the scopes with at least one subscription.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.subscriptions.keys().map(String::as_str)
    }

    /// Returns the origins subscribed to `scope`.
    pub fn domains(&self, scope: &str) -> impl Iterator<Item = &str> {
        self.subscriptions
            .get(scope)
            .into_iter()
            .flat_map(|s| s.listeners.keys())
            .map(String::as_str)
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Collects every matching `(scope, domain)` subscription first, then unsubscribes them one
    /// by one without stopping at the first failure.
    fn unsubscribe_matching(
        &mut self,
        matches: impl Fn(&str, &str) -> bool,
    ) -> Vec<SubscriptionError> {
        let targets: Vec<(String, String)> = self
            .subscriptions
            .iter()
            .flat_map(|(scope, subscriptions)| {
                subscriptions.listeners.iter().flat_map(move |(domain, ids)| {
                    std::iter::repeat_n((scope.clone(), domain.clone()), ids.len())
                })
            })
            .filter(|(scope, domain)| matches(scope.as_str(), domain.as_str()))
            .collect();

        targets
            .into_iter()
            .filter_map(|(scope, domain)| self.unsubscribe(&scope, &domain).err())
            .collect()
    }
}

/// Resolves the chain named by `scope` and builds its subscription manager.
fn create_manager<R: NetworkClientRegistry>(
    registry: &R,
    scope: &str,
) -> Result<Arc<dyn ChainSubscriptionManager>, SubscriptionError> {
    let chain_id = scope
        .parse::<CaipChainId>()
        .ok()
        .and_then(|chain| chain.eip155_chain_id())
        .ok_or_else(|| SubscriptionError::UnsupportedScope(scope.to_string()))?;
    let hex_chain_id = to_hex_chain_id(chain_id);

    let network_client_id =
        registry.find_network_client_id_by_chain_id(&hex_chain_id).ok_or_else(|| {
            SubscriptionError::NetworkClientNotFound {
                scope: scope.to_string(),
                chain_id: hex_chain_id.clone(),
            }
        })?;
    let client = registry
        .get_network_client_by_id(&network_client_id)
        .ok_or(SubscriptionError::NetworkClientUnavailable(network_client_id))?;

    debug!(
        target: "multichain::subscription",
        %scope,
        chain_id = %hex_chain_id,
        "creating chain subscription manager"
    );
    Ok(registry.create_subscription_manager(client))
}
