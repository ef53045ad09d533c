//! SharedState - cross-module coordination primitives
//!
//! The two leaves every composed module hangs off: a keyed value store for
//! shared data and an ordered publish/subscribe bus for change notification.
//! Both are constructed once at process start and handed to every module by
//! `Arc` - there is no ambient global to look up.
//!
//! # Architecture
//!
//! ```text
//!   module A                          module B
//!   ───────                          ───────
//!   store.set("projects", ...)       rx: handler fires
//!   bus.publish("projects:updated")  store.get("projects")
//!            │                            ▲
//!            ▼                            │
//!   ┌─────────────────────────────────────────────┐
//!   │   StateStore (keyed JSON)  +  EventBus      │
//!   └─────────────────────────────────────────────┘
//! ```
//!
//! `StateStore::set` deliberately does NOT notify anyone. A writer that wants
//! other modules to see fresh data must pair every `set` with an explicit
//! `EventBus::publish`; skipping the pairing is how stale views happen.

mod bus;
mod store;

pub use bus::{EventBus, SubscriptionHandle};
pub use store::StateStore;
