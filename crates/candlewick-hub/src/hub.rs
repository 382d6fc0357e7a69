//! Keyed publish/subscribe dispatch.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Errors a subscriber may report back to the hub.
///
/// The hub logs them and carries on delivering to the other subscribers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscriberError {
    /// The subscriber's downstream is gone.
    #[error("Subscriber closed")]
    Closed,

    /// Delivery failed for some other reason.
    #[error("Delivery failed: {0}")]
    Failed(String),
}

/// A callback registered with a [`Hub`].
pub trait Subscriber<E>: Send + Sync {
    /// Handles one published event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event could not be handled.
    fn on_event(&self, event: &E) -> Result<(), SubscriberError>;
}

impl<E, F> Subscriber<E> for F
where
    F: Fn(&E) -> Result<(), SubscriberError> + Send + Sync,
{
    fn on_event(&self, event: &E) -> Result<(), SubscriberError> {
        self(event)
    }
}

/// Shared handle to a subscriber. Identity is the allocation it points to.
pub type SharedSubscriber<E> = Arc<dyn Subscriber<E>>;

/// Wraps a closure as a [`SharedSubscriber`].
pub fn subscriber<E, F>(f: F) -> SharedSubscriber<E>
where
    E: 'static,
    F: Fn(&E) -> Result<(), SubscriberError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Routes events published under a key to every subscriber of that key.
///
/// Each key holds a set of subscribers: subscribing the same handle twice
/// has no further effect. Changes to subscriptions apply to later
/// publishes; a publish already in flight delivers to the subscribers that
/// were registered when it started.
pub struct Hub<K, E> {
    subscribers: RwLock<HashMap<K, Vec<SharedSubscriber<E>>>>,
}

impl<K, E> Hub<K, E>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
        }
    }

    /// Subscribes `subscriber` to every key in `keys`.
    pub fn subscribe(&self, subscriber: &SharedSubscriber<E>, keys: impl IntoIterator<Item = K>) {
        let mut map = self.subscribers.write();
        for key in keys {
            let set = map.entry(key).or_default();
            if !set.iter().any(|s| Arc::ptr_eq(s, subscriber)) {
                set.push(Arc::clone(subscriber));
            }
        }
    }

    /// Removes `subscriber` from every key in `keys`.
    ///
    /// Keys the subscriber was never registered under are ignored.
    pub fn unsubscribe(&self, subscriber: &SharedSubscriber<E>, keys: impl IntoIterator<Item = K>) {
        let mut map = self.subscribers.write();
        for key in keys {
            if let Some(set) = map.get_mut(&key) {
                set.retain(|s| !Arc::ptr_eq(s, subscriber));
                if set.is_empty() {
                    map.remove(&key);
                }
            }
        }
    }

    /// Delivers `event` to every subscriber of `key`.
    ///
    /// Returns the number of subscribers invoked. Subscriber errors are
    /// logged and do not stop delivery.
    pub fn publish(&self, key: &K, event: &E) -> usize {
        // Snapshot so subscribers may (un)subscribe from inside a callback.
        let targets: Vec<SharedSubscriber<E>> = match self.subscribers.read().get(key) {
            Some(set) => set.clone(),
            None => return 0,
        };

        for target in &targets {
            if let Err(error) = target.on_event(event) {
                warn!(%error, "subscriber failed");
            }
        }
        targets.len()
    }

    /// Returns the number of subscribers registered under `key`.
    #[must_use]
    pub fn subscriber_count(&self, key: &K) -> usize {
        self.subscribers.read().get(key).map_or(0, Vec::len)
    }

    /// Returns the number of keys with at least one subscriber.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl<K, E> Default for Hub<K, E>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, E> std::fmt::Debug for Hub<K, E>
where
    K: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let map = self.subscribers.read();
        let mut debug = f.debug_map();
        for (key, set) in map.iter() {
            debug.entry(key, &set.len());
        }
        debug.finish()
    }
}
