//! LifecycleAdapter - phase machine around one consumer module

use thiserror::Error;
use tracing::{debug, warn};

use super::{MicroApp, MountProps};

/// Where a module instance is in its lifecycle.
///
/// `unmount` returns the module to `Bootstrapped`, ready to remount;
/// `Closed` is the terminal page-teardown phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Registered,
    Bootstrapped,
    Mounted,
    Closed,
}

/// Errors surfaced to the orchestrator by lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A hook was invoked outside the permitted sequence.
    #[error("{op} called on module '{module}' while {phase:?}")]
    OutOfPhase {
        module: String,
        op: &'static str,
        phase: Phase,
    },

    /// The module's own hook body failed.
    #[error("{op} failed for module '{module}'")]
    Hook {
        module: String,
        op: &'static str,
        #[source]
        source: eyre::Report,
    },
}

/// Wraps one [`MicroApp`] to satisfy the orchestrator's contract.
///
/// Enforces `Registered -(bootstrap)-> Bootstrapped -(mount)-> Mounted
/// -(unmount)-> Bootstrapped`, with remount cycles permitted. A second
/// `bootstrap` call replays the cached outcome of the first instead of
/// re-running setup.
pub struct LifecycleAdapter {
    app: Box<dyn MicroApp>,
    phase: Phase,
    // Outcome of the first bootstrap, replayed on every later call.
    // Report is not Clone, so a failure is cached as its rendered message.
    bootstrap_outcome: Option<Result<(), String>>,
}

impl LifecycleAdapter {
    pub fn new(app: Box<dyn MicroApp>) -> Self {
        debug!(module = app.name(), "LifecycleAdapter::new: registering module");
        Self {
            app,
            phase: Phase::Registered,
            bootstrap_outcome: None,
        }
    }

    pub fn name(&self) -> &str {
        self.app.name()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run one-time setup, or replay its cached outcome.
    pub async fn bootstrap(&mut self) -> Result<(), LifecycleError> {
        if self.phase == Phase::Closed {
            return Err(self.out_of_phase("bootstrap"));
        }

        if let Some(outcome) = &self.bootstrap_outcome {
            debug!(module = self.app.name(), "bootstrap already ran; replaying cached outcome");
            return outcome.clone().map_err(|msg| LifecycleError::Hook {
                module: self.app.name().to_string(),
                op: "bootstrap",
                source: eyre::eyre!(msg),
            });
        }

        debug!(module = self.app.name(), "LifecycleAdapter::bootstrap");
        match self.app.bootstrap().await {
            Ok(()) => {
                self.bootstrap_outcome = Some(Ok(()));
                self.phase = Phase::Bootstrapped;
                Ok(())
            }
            Err(source) => {
                self.bootstrap_outcome = Some(Err(format!("{source:#}")));
                Err(LifecycleError::Hook {
                    module: self.app.name().to_string(),
                    op: "bootstrap",
                    source,
                })
            }
        }
    }

    /// Mount the module. Legal only from `Bootstrapped`; a failed mount
    /// leaves the module bootstrapped so the orchestrator may retry.
    pub async fn mount(&mut self, props: &MountProps) -> Result<(), LifecycleError> {
        if self.phase != Phase::Bootstrapped {
            return Err(self.out_of_phase("mount"));
        }

        debug!(module = self.app.name(), target = %props.target, "LifecycleAdapter::mount");
        self.app.mount(props).await.map_err(|source| LifecycleError::Hook {
            module: self.app.name().to_string(),
            op: "mount",
            source,
        })?;
        self.phase = Phase::Mounted;
        Ok(())
    }

    /// Unmount the module, returning it to `Bootstrapped` for remount.
    ///
    /// A failed unmount leaves the module `Mounted`: its resources were not
    /// provably released, and pretending otherwise would leak them into the
    /// next mount cycle.
    pub async fn unmount(&mut self, props: &MountProps) -> Result<(), LifecycleError> {
        if self.phase != Phase::Mounted {
            return Err(self.out_of_phase("unmount"));
        }

        debug!(module = self.app.name(), "LifecycleAdapter::unmount");
        self.app.unmount(props).await.map_err(|source| {
            warn!(module = self.app.name(), "unmount failed; resources may still be held");
            LifecycleError::Hook {
                module: self.app.name().to_string(),
                op: "unmount",
                source,
            }
        })?;
        self.phase = Phase::Bootstrapped;
        Ok(())
    }

    /// Terminal page teardown. Every lifecycle call after this is rejected.
    pub fn close(&mut self) {
        debug!(module = self.app.name(), "LifecycleAdapter::close");
        self.phase = Phase::Closed;
    }

    fn out_of_phase(&self, op: &'static str) -> LifecycleError {
        LifecycleError::OutOfPhase {
            module: self.app.name().to_string(),
            op,
            phase: self.phase,
        }
    }
}
