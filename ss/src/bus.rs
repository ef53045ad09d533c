//! EventBus - ordered publish/subscribe for cross-module notification

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::{debug, error};

/// Callback invoked with the payload of every publish on a subscribed topic.
///
/// Handlers are fallible: an `Err` is caught by the bus, reported through
/// tracing, and never interrupts delivery to the remaining subscribers.
pub type Handler = dyn Fn(&Value) -> eyre::Result<()> + Send + Sync;

/// Proof of one registration on the bus, required to remove it again.
///
/// Dropping a handle does NOT unsubscribe - release is explicit so the
/// owning module can do it deterministically at unmount. Passing an
/// already-removed handle to `unsubscribe` is a no-op.
#[derive(Debug)]
pub struct SubscriptionHandle {
    topic: String,
    id: u64,
}

impl SubscriptionHandle {
    /// Topic this handle was registered under.
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

struct Registration {
    id: u64,
    handler: Arc<Handler>,
}

/// Central publish/subscribe bus.
///
/// Subscribers for a topic are invoked synchronously, in insertion order,
/// against a snapshot of the list taken when `publish` is entered: handlers
/// added or removed by another handler during a dispatch do not affect that
/// dispatch. Publishing a topic nobody subscribed to is a no-op.
#[derive(Default)]
pub struct EventBus {
    // Vec order per topic is insertion order, which is delivery order
    topics: Mutex<HashMap<String, Vec<Registration>>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        debug!("EventBus::new: creating bus");
        Self::default()
    }

    /// Register `handler` for `topic`; returns the handle that removes it.
    pub fn subscribe(
        &self,
        topic: impl Into<String>,
        handler: impl Fn(&Value) -> eyre::Result<()> + Send + Sync + 'static,
    ) -> SubscriptionHandle {
        let topic = topic.into();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(%topic, id, "EventBus::subscribe");
        self.lock().entry(topic.clone()).or_default().push(Registration {
            id,
            handler: Arc::new(handler),
        });
        SubscriptionHandle { topic, id }
    }

    /// Remove exactly the registration behind `handle`.
    ///
    /// Removing a handle that was already removed is a no-op, not an error.
    pub fn unsubscribe(&self, handle: &SubscriptionHandle) {
        debug!(topic = %handle.topic, id = handle.id, "EventBus::unsubscribe");
        let mut topics = self.lock();
        if let Some(registrations) = topics.get_mut(&handle.topic) {
            registrations.retain(|r| r.id != handle.id);
            if registrations.is_empty() {
                topics.remove(&handle.topic);
            }
        }
    }

    /// Synchronously deliver `payload` to every handler subscribed to `topic`
    /// at the moment this call is entered.
    ///
    /// A handler that returns `Err` is isolated: the failure is logged and
    /// fan-out continues with the next subscriber. Handlers run outside the
    /// registry lock, so they may publish, subscribe, or unsubscribe
    /// reentrantly.
    pub fn publish(&self, topic: &str, payload: &Value) {
        let snapshot: Vec<(u64, Arc<Handler>)> = {
            let topics = self.lock();
            match topics.get(topic) {
                Some(registrations) => registrations
                    .iter()
                    .map(|r| (r.id, Arc::clone(&r.handler)))
                    .collect(),
                None => return,
            }
        };
        debug!(%topic, subscribers = snapshot.len(), "EventBus::publish");

        for (id, handler) in snapshot {
            if let Err(e) = handler(payload) {
                // Contained per handler: one bad subscriber never starves the rest
                error!(%topic, subscription_id = id, error = %e, "subscriber failed during publish");
            }
        }
    }

    /// Active registrations for one topic.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.lock().get(topic).map_or(0, Vec::len)
    }

    /// Active registrations across all topics. Lets tests assert that a
    /// mount/unmount cycle leaked nothing.
    pub fn total_subscriptions(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<Registration>>> {
        self.topics.lock().unwrap_or_else(|e| e.into_inner())
    }
}
