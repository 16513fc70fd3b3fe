//! Online/offline derivation from sample recency.
//!
//! There is no heartbeat: a server is online while its latest snapshot is
//! younger than the staleness window. Collection runs nightly, so the window
//! is 25 hours; anything shorter flags the whole fleet offline between runs.

use chrono::Duration;

use crate::types::Timestamp;

/// Length of the staleness window in seconds (25 hours).
pub const STALENESS_WINDOW_SECS: i64 = 25 * 60 * 60;

/// The staleness window as a [`Duration`].
pub fn staleness_window() -> Duration {
    Duration::seconds(STALENESS_WINDOW_SECS)
}

/// Earliest instant still inside the window: rows strictly newer than this
/// are fresh.
pub fn window_start(now: Timestamp) -> Timestamp {
    now - staleness_window()
}

/// `true` iff `recorded_at` is strictly less than one window before `now`.
pub fn is_fresh(now: Timestamp, recorded_at: Timestamp) -> bool {
    now.signed_duration_since(recorded_at) < staleness_window()
}

/// A server is online iff it has a metrics snapshot and that snapshot is fresh.
pub fn is_online(now: Timestamp, last_metrics_at: Option<Timestamp>) -> bool {
    last_metrics_at.is_some_and(|ts| is_fresh(now, ts))
}

/// Fleet-level online rule: a fresh metrics snapshot OR a fresh storage
/// snapshot is enough. Storage and metrics checks run independently.
pub fn counts_as_online(
    now: Timestamp,
    last_metrics_at: Option<Timestamp>,
    last_storage_at: Option<Timestamp>,
) -> bool {
    is_online(now, last_metrics_at) || last_storage_at.is_some_and(|ts| is_fresh(now, ts))
}
