//! Remote data access for consumer modules
//!
//! One HTTP GET per collection, no retry, no caching. Results are written
//! into the shared store or held module-locally; nothing here auto-syncs.

mod provider;
mod records;

pub use provider::{DataError, DataProvider, PROJECTS, TASKS, TEAM};
pub use records::{Project, TaskRecord, Team};
