//! Tasks module - local task list grouped by shared project names

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use sharedstate::{StateStore, SubscriptionHandle};
use tracing::{debug, warn};

use crate::data::{Project, TaskRecord};
use crate::events::topic;
use crate::lifecycle::{MicroApp, MountProps};
use crate::platform::{Platform, key};

/// Holds its fetched tasks locally and regroups them by project name
/// whenever the projects module announces a change to the shared list.
pub struct TasksApp {
    platform: Arc<Platform>,
    subs: Vec<SubscriptionHandle>,
    tasks: Arc<Mutex<Vec<TaskRecord>>>,
    by_project: Arc<Mutex<HashMap<String, Vec<TaskRecord>>>>,
}

impl TasksApp {
    pub fn new(platform: Arc<Platform>) -> Self {
        Self {
            platform,
            subs: Vec::new(),
            tasks: Arc::new(Mutex::new(Vec::new())),
            by_project: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Current view: tasks grouped under the shared project names.
    pub fn by_project(&self) -> HashMap<String, Vec<TaskRecord>> {
        self.by_project
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn regroup(state: &StateStore, tasks: &[TaskRecord]) -> HashMap<String, Vec<TaskRecord>> {
        let projects: Vec<Project> = state.get_as(key::PROJECTS).unwrap_or_default();
        let names: HashMap<u64, &str> = projects.iter().map(|p| (p.id, p.name.as_str())).collect();

        let mut grouped: HashMap<String, Vec<TaskRecord>> = HashMap::new();
        for task in tasks {
            let name = names.get(&task.project_id).copied().unwrap_or("(unassigned)");
            grouped.entry(name.to_string()).or_default().push(task.clone());
        }
        grouped
    }
}

#[async_trait]
impl MicroApp for TasksApp {
    fn name(&self) -> &str {
        "tasks"
    }

    async fn bootstrap(&mut self) -> eyre::Result<()> {
        debug!("tasks: bootstrap");
        Ok(())
    }

    async fn mount(&mut self, props: &MountProps) -> eyre::Result<()> {
        debug!(target = %props.target, "tasks: mount");

        // Task data stays module-local; only the grouping reads shared state
        match self.platform.data().tasks().await {
            Ok(fetched) => {
                *self.tasks.lock().unwrap_or_else(PoisonError::into_inner) = fetched;
            }
            Err(e) => warn!(error = %e, "task fetch failed; rendering with an empty task list"),
        }

        let initial = {
            let tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
            Self::regroup(self.platform.state(), &tasks)
        };
        *self.by_project.lock().unwrap_or_else(PoisonError::into_inner) = initial;

        // The event only says "something changed"; the handler re-reads the
        // store for the data itself
        let state = Arc::clone(self.platform.state());
        let tasks = Arc::clone(&self.tasks);
        let by_project = Arc::clone(&self.by_project);
        let handle = self.platform.bus().subscribe(topic::PROJECTS_UPDATED, move |_payload| {
            let grouped = {
                let tasks = tasks.lock().unwrap_or_else(PoisonError::into_inner);
                Self::regroup(&state, &tasks)
            };
            *by_project.lock().unwrap_or_else(PoisonError::into_inner) = grouped;
            Ok(())
        });
        self.subs.push(handle);

        Ok(())
    }

    async fn unmount(&mut self, _props: &MountProps) -> eyre::Result<()> {
        debug!(subscriptions = self.subs.len(), "tasks: unmount");
        for handle in self.subs.drain(..) {
            debug!(topic = handle.topic(), "tasks: releasing subscription");
            self.platform.bus().unsubscribe(&handle);
        }
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner).clear();
        self.by_project
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }
}
