//! StateStore - shared keyed value store

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Process-wide keyed value store shared by every mounted module.
///
/// Keys are globally unique across all modules; the store enforces no
/// namespacing. A key outlives any single module's mount cycle - modules own
/// subscriptions, not keys.
///
/// Writes are last-write-wins with no merge and **no change notification**:
/// a module that wants others to observe a write must follow the `set` with
/// an explicit [`EventBus::publish`](crate::EventBus::publish). Individual
/// `get`/`set` calls are atomic, but a read-modify-write that spans an await
/// is not - two modules doing that concurrently will silently lose one write.
#[derive(Default)]
pub struct StateStore {
    values: Mutex<HashMap<String, Value>>,
}

impl StateStore {
    pub fn new() -> Self {
        debug!("StateStore::new: creating store");
        Self::default()
    }

    /// Current value at `key`, or `None` if no module has written there.
    /// Never fails.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    /// Unconditionally replace the value at `key`. No merge, no validation,
    /// no notification. Visible to every subsequent `get` from any module.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        debug!(%key, "StateStore::set");
        self.lock().insert(key, value);
    }

    /// Typed read: deserialize the value at `key` into `T`.
    ///
    /// Returns `None` when the key is absent or the stored value does not
    /// match the expected shape. Typing lives at the module boundary; the
    /// store itself only knows JSON.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(e) => {
                debug!(%key, error = %e, "StateStore::get_as: stored value has unexpected shape");
                None
            }
        }
    }

    /// Typed write: serialize `value` and store it at `key`.
    pub fn set_value<T: Serialize>(&self, key: impl Into<String>, value: &T) -> serde_json::Result<()> {
        self.set(key, serde_json::to_value(value)?);
        Ok(())
    }

    /// Number of keys currently present.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        // A poisoned lock only means some writer panicked mid-insert; the map
        // itself is still usable and get() must never fail.
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_then_get_returns_value() {
        let store = StateStore::new();
        store.set("projects", json!([{"id": 1, "name": "Project Alpha"}]));
        assert_eq!(
            store.get("projects"),
            Some(json!([{"id": 1, "name": "Project Alpha"}]))
        );
    }

    #[test]
    fn test_get_absent_key_is_none() {
        let store = StateStore::new();
        assert_eq!(store.get("nope"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_is_last_write_wins() {
        let store = StateStore::new();
        store.set("counter", json!({"value": 1, "label": "first"}));
        // Full replacement: no field-level merge with the previous value
        store.set("counter", json!({"value": 2}));
        assert_eq!(store.get("counter"), Some(json!({"value": 2})));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_cross_reference_visibility() {
        // Two handles to the same store see each other's writes
        let store = std::sync::Arc::new(StateStore::new());
        let writer = std::sync::Arc::clone(&store);
        let reader = std::sync::Arc::clone(&store);

        writer.set("projects", json!([{"id": 1, "name": "Project Alpha"}]));
        assert_eq!(
            reader.get("projects"),
            Some(json!([{"id": 1, "name": "Project Alpha"}]))
        );
    }

    #[test]
    fn test_typed_round_trip() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Badge {
            total: u64,
        }

        let store = StateStore::new();
        store.set_value("badge", &Badge { total: 7 }).unwrap();
        assert_eq!(store.get_as::<Badge>("badge"), Some(Badge { total: 7 }));
    }

    #[test]
    fn test_get_as_wrong_shape_is_none() {
        let store = StateStore::new();
        store.set("badge", json!("not an object"));
        assert_eq!(store.get_as::<u64>("badge"), None);
        // The raw value is still there untouched
        assert_eq!(store.get("badge"), Some(json!("not an object")));
    }

    #[test]
    fn test_set_does_not_notify() {
        // Documented hazard: set performs no change notification. Nothing to
        // observe here beyond the absence of any subscription surface on the
        // store - freshness requires an explicit EventBus publish.
        let store = StateStore::new();
        store.set("silent", json!(1));
        store.set("silent", json!(2));
        assert_eq!(store.get("silent"), Some(json!(2)));
    }
}
