//! Projects module - owner of the shared `projects` key

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::events::topic;
use crate::lifecycle::{MicroApp, MountProps};
use crate::platform::{Platform, key};

/// Fetches the live project list and shares it with every other module.
pub struct ProjectsApp {
    platform: Arc<Platform>,
}

impl ProjectsApp {
    pub fn new(platform: Arc<Platform>) -> Self {
        Self { platform }
    }

    /// Fetch `/projects`, replace the shared copy, announce the change.
    ///
    /// The `set` and the `publish` belong together: a bare `set` would leave
    /// every subscribed module rendering stale data.
    pub async fn refresh(&self) -> eyre::Result<()> {
        match self.platform.data().projects().await {
            Ok(records) => {
                self.platform.state().set_value(key::PROJECTS, &records)?;
                self.platform
                    .bus()
                    .publish(topic::PROJECTS_UPDATED, &json!({"count": records.len()}));
            }
            Err(e) => {
                // No retry; keep whatever the store already had
                warn!(error = %e, "project fetch failed; shared project list left as-is");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl MicroApp for ProjectsApp {
    fn name(&self) -> &str {
        "projects"
    }

    async fn bootstrap(&mut self) -> eyre::Result<()> {
        debug!("projects: bootstrap");
        Ok(())
    }

    async fn mount(&mut self, props: &MountProps) -> eyre::Result<()> {
        debug!(target = %props.target, "projects: mount");
        // The first render needs data, so the initial load is awaited inline
        self.refresh().await
    }

    async fn unmount(&mut self, _props: &MountProps) -> eyre::Result<()> {
        debug!("projects: unmount");
        // Holds no subscriptions; the shared `projects` key deliberately
        // outlives the module
        Ok(())
    }
}
