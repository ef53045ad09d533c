//! Mosaic - coordination runtime for independently deployed front-end modules
//!
//! Several independently built modules (dashboard, navbar, projects, tasks)
//! compose into one page at runtime. They share mutable data through a keyed
//! [`StateStore`], notify each other through an ordered [`EventBus`], and are
//! mounted and unmounted by an external orchestrator through the
//! [`lifecycle`] contract.
//!
//! # Core Rules
//!
//! - **Explicit sharing**: the store and bus are constructed once by
//!   [`Platform::new`](platform::Platform::new) and injected by `Arc`; no
//!   ambient globals.
//! - **Set then publish**: `StateStore::set` notifies nobody. Writers pair
//!   every shared write with an explicit event publish or leave everyone
//!   else stale.
//! - **Scoped acquisition**: every subscription taken in `mount` is released
//!   in the matching `unmount`; leaked handlers across remounts are the bug
//!   class this crate is built to prevent.
//! - **Last write wins**: no merge semantics at any key, and no atomicity
//!   for read-modify-write sequences that span an await.
//!
//! # Modules
//!
//! - [`lifecycle`] - the `bootstrap`/`mount`/`unmount` contract and adapter
//! - [`data`] - HTTP fetch of the remote collections
//! - [`apps`] - the four consumer modules
//! - [`platform`] - once-per-process service construction
//! - [`config`] - runtime configuration

pub mod apps;
pub mod cli;
pub mod config;
pub mod data;
pub mod events;
pub mod lifecycle;
pub mod platform;

// Re-export commonly used types
pub use apps::{DashboardApp, NavbarApp, ProjectsApp, TasksApp};
pub use config::Config;
pub use data::{DataError, DataProvider, Project, TaskRecord, Team};
pub use lifecycle::{LifecycleAdapter, LifecycleError, MicroApp, MountProps, Phase};
pub use platform::Platform;
pub use sharedstate::{EventBus, StateStore, SubscriptionHandle};
