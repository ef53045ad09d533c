//! Consumer modules
//!
//! One struct per independently deployed app. Each holds an `Arc<Platform>`
//! injected at construction, implements the [`MicroApp`](crate::lifecycle::MicroApp)
//! contract, and releases at unmount exactly the subscriptions it took at
//! mount.

mod dashboard;
mod navbar;
mod projects;
mod tasks;

pub use dashboard::DashboardApp;
pub use navbar::NavbarApp;
pub use projects::ProjectsApp;
pub use tasks::TasksApp;
