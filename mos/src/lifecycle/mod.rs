//! Lifecycle contract between the host orchestrator and consumer modules
//!
//! The orchestrator itself lives outside this crate; what it needs from every
//! module is the three-hook [`MicroApp`] contract, and what it gets back is a
//! [`LifecycleAdapter`] that enforces the legal call sequence
//! `bootstrap -> mount -> unmount -> mount -> ...` and caches the one-time
//! bootstrap outcome.

mod adapter;

use async_trait::async_trait;
use serde_json::{Map, Value};

pub use adapter::{LifecycleAdapter, LifecycleError, Phase};

/// Props the orchestrator passes to every lifecycle hook.
#[derive(Debug, Clone, Default)]
pub struct MountProps {
    /// Identifier of the slot the module renders into.
    pub target: String,
    /// Route prefix the module is mounted under.
    pub base_path: String,
    /// Extra orchestrator-defined fields; opaque to the adapter.
    pub extra: Map<String, Value>,
}

impl MountProps {
    pub fn new(target: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            base_path: base_path.into(),
            extra: Map::new(),
        }
    }
}

/// The contract every consumer module implements.
///
/// Hooks return `eyre::Result` so a module can fail setup or teardown with
/// context; the adapter wraps such failures into [`LifecycleError::Hook`]
/// and surfaces them to the orchestrator - never swallowed, since only the
/// orchestrator can decide whether to retry a mount.
#[async_trait]
pub trait MicroApp: Send {
    /// Stable name used in logs and errors.
    fn name(&self) -> &str;

    /// One-time setup. The adapter guarantees this body runs at most once
    /// per module instance, no matter how often `bootstrap` is called.
    async fn bootstrap(&mut self) -> eyre::Result<()>;

    /// Acquire everything needed while active: event subscriptions, any
    /// polling, a first render. Must not assume it is the first mount -
    /// after a prior unmount it reacquires everything from scratch.
    async fn mount(&mut self, props: &MountProps) -> eyre::Result<()>;

    /// Release exactly what the matching `mount` acquired. Leaked handlers
    /// across mount cycles are the principal defect class here.
    async fn unmount(&mut self, props: &MountProps) -> eyre::Result<()>;
}
