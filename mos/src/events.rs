//! Event topics shared across modules
//!
//! Names are centralised so publisher and subscriber cannot drift apart on a
//! string literal. Payloads are small JSON objects; receivers re-read the
//! store for the actual data rather than trusting the payload to carry it.

pub mod topic {
    /// The `projects` key was rewritten. Payload: `{"count": n}`.
    pub const PROJECTS_UPDATED: &str = "projects:updated";

    /// The `dashboard` summary key was recomputed (or its refresh failed;
    /// check the `dashboard:error` key). Payload: `{"ok": bool}`.
    pub const DASHBOARD_UPDATED: &str = "dashboard:updated";

    /// The navbar announced a navigation. Payload: `{"path": "..."}`.
    pub const ROUTE_CHANGED: &str = "route:changed";
}
