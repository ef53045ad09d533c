//! Dashboard module - background refresh of the shared summary

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::data::DataError;
use crate::events::topic;
use crate::lifecycle::{MicroApp, MountProps};
use crate::platform::{Platform, key};

/// Recomputes the shared `dashboard` summary from all three collections.
///
/// The refresh runs as a spawned task so mount stays fast. In-flight
/// requests cannot be cancelled, so the completion path checks a
/// mount generation before touching shared state: the counter bumps on
/// every mount and unmount, and a task only writes while the generation
/// it captured at spawn is still current. A refresh spawned before an
/// unmount stays discarded even if the module has remounted since.
pub struct DashboardApp {
    platform: Arc<Platform>,
    generation: Arc<AtomicU64>,
}

impl DashboardApp {
    pub fn new(platform: Arc<Platform>) -> Self {
        Self {
            platform,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }
}

async fn refresh(platform: &Platform) -> Result<Value, DataError> {
    let (projects, tasks, team) = tokio::join!(
        platform.data().projects(),
        platform.data().tasks(),
        platform.data().team(),
    );
    let (projects, tasks, team) = (projects?, tasks?, team?);

    Ok(json!({
        "totalProjects": projects.len(),
        "totalTasks": tasks.len(),
        "totalTeamMembers": team.len(),
        "projects": projects,
        "tasks": tasks,
        "teams": team,
    }))
}

#[async_trait]
impl MicroApp for DashboardApp {
    fn name(&self) -> &str {
        "dashboard"
    }

    async fn bootstrap(&mut self) -> eyre::Result<()> {
        debug!("dashboard: bootstrap");
        Ok(())
    }

    async fn mount(&mut self, props: &MountProps) -> eyre::Result<()> {
        debug!(target = %props.target, "dashboard: mount");
        let spawned_at = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let platform = Arc::clone(&self.platform);
        let generation = Arc::clone(&self.generation);
        tokio::spawn(async move {
            let result = refresh(&platform).await;

            // The request could not be cancelled; if we unmounted (or
            // remounted) while it was in flight, discard the result instead
            // of writing as an acquisition that already released its
            // resources.
            if generation.load(Ordering::SeqCst) != spawned_at {
                debug!("dashboard refresh landed after unmount; discarding");
                return;
            }

            match result {
                Ok(summary) => {
                    platform.state().set(key::DASHBOARD, summary);
                    platform.state().set(key::DASHBOARD_ERROR, Value::Null);
                    platform.bus().publish(topic::DASHBOARD_UPDATED, &json!({"ok": true}));
                }
                Err(e) => {
                    // Visible error flag, no retry
                    warn!(error = %e, "dashboard refresh failed");
                    platform.state().set(key::DASHBOARD_ERROR, json!(e.to_string()));
                    platform.bus().publish(topic::DASHBOARD_UPDATED, &json!({"ok": false}));
                }
            }
        });

        Ok(())
    }

    async fn unmount(&mut self, _props: &MountProps) -> eyre::Result<()> {
        debug!("dashboard: unmount");
        self.generation.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
