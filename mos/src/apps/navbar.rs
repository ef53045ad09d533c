//! Navbar module - badge counts, navigation announcements, active-route highlight

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::json;
use sharedstate::SubscriptionHandle;
use tracing::debug;

use crate::events::topic;
use crate::lifecycle::{MicroApp, MountProps};
use crate::platform::{Platform, key};

/// Shows a project-count badge fed from the shared dashboard summary,
/// announces navigation to everyone else, and highlights whichever route
/// was last announced (its own announcements included).
pub struct NavbarApp {
    platform: Arc<Platform>,
    subs: Vec<SubscriptionHandle>,
    total_projects: Arc<AtomicU64>,
    active_path: Arc<Mutex<String>>,
}

impl NavbarApp {
    pub fn new(platform: Arc<Platform>) -> Self {
        Self {
            platform,
            subs: Vec::new(),
            total_projects: Arc::new(AtomicU64::new(0)),
            active_path: Arc::new(Mutex::new("/".to_string())),
        }
    }

    /// Current badge value.
    pub fn badge(&self) -> u64 {
        self.total_projects.load(Ordering::SeqCst)
    }

    /// Route currently highlighted in the nav.
    pub fn active_path(&self) -> String {
        self.active_path
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Announce a navigation; interested modules subscribe to the topic.
    /// The navbar's own highlight updates through that same subscription.
    pub fn navigate(&self, path: &str) {
        debug!(%path, "navbar: navigate");
        self.platform
            .bus()
            .publish(topic::ROUTE_CHANGED, &json!({"path": path}));
    }

    fn read_badge(platform: &Platform) -> u64 {
        platform
            .state()
            .get(key::DASHBOARD)
            .and_then(|summary| summary["totalProjects"].as_u64())
            .unwrap_or(0)
    }
}

#[async_trait]
impl MicroApp for NavbarApp {
    fn name(&self) -> &str {
        "navbar"
    }

    async fn bootstrap(&mut self) -> eyre::Result<()> {
        debug!("navbar: bootstrap");
        Ok(())
    }

    async fn mount(&mut self, props: &MountProps) -> eyre::Result<()> {
        debug!(target = %props.target, "navbar: mount");
        self.total_projects
            .store(Self::read_badge(&self.platform), Ordering::SeqCst);

        let platform = Arc::clone(&self.platform);
        let total_projects = Arc::clone(&self.total_projects);
        let handle = self
            .platform
            .bus()
            .subscribe(topic::DASHBOARD_UPDATED, move |_payload| {
                total_projects.store(Self::read_badge(&platform), Ordering::SeqCst);
                Ok(())
            });
        self.subs.push(handle);

        let active_path = Arc::clone(&self.active_path);
        let handle = self.platform.bus().subscribe(topic::ROUTE_CHANGED, move |payload| {
            if let Some(path) = payload["path"].as_str() {
                *active_path.lock().unwrap_or_else(PoisonError::into_inner) = path.to_string();
            }
            Ok(())
        });
        self.subs.push(handle);

        Ok(())
    }

    async fn unmount(&mut self, _props: &MountProps) -> eyre::Result<()> {
        for handle in self.subs.drain(..) {
            debug!(topic = handle.topic(), "navbar: releasing subscription");
            self.platform.bus().unsubscribe(&handle);
        }
        self.total_projects.store(0, Ordering::SeqCst);
        *self
            .active_path
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = "/".to_string();
        Ok(())
    }
}
