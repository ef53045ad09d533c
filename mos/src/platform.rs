//! Platform - once-per-process construction of the shared services
//!
//! The store, the bus, and the data provider are explicit instances created
//! here and injected into every module by `Arc`. No module reaches for an
//! ambient global.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use sharedstate::{EventBus, StateStore};
use tracing::debug;

use crate::config::Config;
use crate::data::DataProvider;

/// Shared state keys owned by convention (the store enforces none of this).
pub mod key {
    /// `Vec<Project>` - the project list shared between modules.
    pub const PROJECTS: &str = "projects";
    /// Summary object rendered by dashboard and navbar.
    pub const DASHBOARD: &str = "dashboard";
    /// Last dashboard refresh failure as a string, or null after a success.
    pub const DASHBOARD_ERROR: &str = "dashboard:error";
}

/// The shared services handed to every consumer module.
pub struct Platform {
    state: Arc<StateStore>,
    bus: Arc<EventBus>,
    data: Arc<DataProvider>,
}

impl Platform {
    /// Build the process-wide service set and seed the initial shared state.
    pub fn new(config: &Config) -> eyre::Result<Arc<Self>> {
        debug!(api_base_url = %config.api_base_url, "Platform::new");
        let state = Arc::new(StateStore::new());
        seed_dashboard(&state);

        let bus = Arc::new(EventBus::new());
        let data = Arc::new(DataProvider::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?);

        Ok(Arc::new(Self { state, bus, data }))
    }

    pub fn state(&self) -> &Arc<StateStore> {
        &self.state
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn data(&self) -> &Arc<DataProvider> {
        &self.data
    }
}

/// Seed the `dashboard` key with the canonical demo dataset, mirroring what
/// a fresh deployment shows before any module has fetched live data.
fn seed_dashboard(state: &StateStore) {
    let projects = json!([
        {"id": 1, "name": "Project Alpha", "description": "Description of Project Alpha", "date": "2023-01-01"},
        {"id": 2, "name": "Project Beta", "description": "Description of Project Beta", "date": "2023-02-01"},
        {"id": 3, "name": "Project Gamma", "description": "Description of Project Gamma", "date": "2023-03-01"},
        {"id": 4, "name": "Project Delta", "description": "Description of Project Delta", "date": "2023-04-01"},
        {"id": 5, "name": "Project Epsilon", "description": "Description of Project Epsilon", "date": "2023-05-01"},
        {"id": 6, "name": "Project Zeta", "description": "Description of Project Zeta", "date": "2023-06-01"},
        {"id": 7, "name": "Project Eta", "description": "Description of Project Eta", "date": "2023-07-01"},
        {"id": 8, "name": "Project Theta", "description": "Description of Project Theta", "date": "2023-08-01"},
        {"id": 9, "name": "Project Iota", "description": "Description of Project Iota", "date": "2023-09-01"},
        {"id": 10, "name": "Project Kappa", "description": "Description of Project Kappa", "date": "2023-10-01"},
    ]);
    let tasks = json!([
        {"id": 1, "projectId": 1, "name": "Design Mockups", "status": "Completed"},
        {"id": 2, "projectId": 2, "name": "API Integration", "status": "In Progress"},
    ]);
    let teams = json!([
        {"id": 1, "name": "Team Alpha", "members": ["John Doe", "Jane Smith"]},
        {"id": 2, "name": "Team Beta", "members": ["Alice Johnson", "Bob Brown"]},
    ]);

    let summary = json!({
        "totalProjects": projects.as_array().map_or(0, Vec::len),
        "totalTasks": tasks.as_array().map_or(0, Vec::len),
        "totalTeamMembers": teams.as_array().map_or(0, Vec::len),
        "projects": projects,
        "tasks": tasks,
        "teams": teams,
    });
    state.set(key::DASHBOARD, summary);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_seeds_dashboard() {
        let platform = Platform::new(&Config::default()).unwrap();
        let dashboard = platform.state().get(key::DASHBOARD).unwrap();
        assert_eq!(dashboard["totalProjects"], 10);
        assert_eq!(dashboard["totalTasks"], 2);
        assert_eq!(dashboard["projects"][0]["name"], "Project Alpha");
    }

    #[test]
    fn test_platform_starts_with_no_subscriptions() {
        let platform = Platform::new(&Config::default()).unwrap();
        assert_eq!(platform.bus().total_subscriptions(), 0);
    }
}
