//! HTTP routes exposed by the Gold Rush backend

/// Full world snapshot (bearer auth)
pub const ADMIN_WORLD: &str = "/admin/world";

/// Participant status, keyed by [`ENTITY_KEY_PARAM`]
pub const STATUS: &str = "/status";

/// Archived snapshot log (bearer auth)
pub const ADMIN_LOGS: &str = "/admin/logs";

/// Truncate the snapshot log (bearer auth)
pub const ADMIN_LOGS_CLEAR: &str = "/admin/logs/clear";

/// Query parameter carrying the participant's entity key, both on the status
/// route and in the client's own page URL.
pub const ENTITY_KEY_PARAM: &str = "entityKey";
