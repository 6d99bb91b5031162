//! A minimal synchronous event emitter.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use parking_lot::Mutex;
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

/// Identifies a listener registered with [`EventEmitter::on`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Fans events out to registered listeners and channel subscribers.
///
/// Listeners are invoked on the emitting thread, outside the internal lock, so a listener may
/// register or remove listeners itself.
pub struct EventEmitter<T> {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(ListenerId, Listener<T>)>>,
    /// Channel subscribers, dropped once their receiver is gone.
    senders: Mutex<Vec<UnboundedSender<T>>>,
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            listeners: Mutex::new(Vec::new()),
            senders: Mutex::new(Vec::new()),
        }
    }
}

impl<T> fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.lock().len())
            .field("senders", &self.senders.lock().len())
            .finish()
    }
}

impl<T> EventEmitter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` and returns its id.
    pub fn on(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Removes the listener with the given id, returning whether it was registered.
    pub fn off(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let len = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != len
    }

    /// Returns the number of registered listeners, channel subscribers excluded.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl<T: Clone> EventEmitter<T> {
    /// Delivers `event` to every listener and channel subscriber.
    pub fn emit(&self, event: &T) {
        let listeners: Vec<_> =
            self.listeners.lock().iter().map(|(_, listener)| listener.clone()).collect();
        for listener in listeners {
            listener(event);
        }

        self.senders.lock().retain(|tx| tx.unbounded_send(event.clone()).is_ok());
    }

    /// Returns a new channel receiving every event emitted from now on.
    pub fn subscribe(&self) -> UnboundedReceiver<T> {
        let (tx, rx) = unbounded();
        self.senders.lock().push(tx);
        rx
    }
}
