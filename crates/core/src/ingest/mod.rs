//! Validation of agent payloads before they reach the database.
//!
//! Agents post loosely-typed JSON. The readers here collect every field
//! violation into one [`CoreError::Validation`](crate::error::CoreError)
//! instead of stopping at the first, and produce fully-typed insert DTOs.

mod fields;
pub mod health_sample;
pub mod storage_report;

pub use health_sample::{prepare_health_sample, NewHealthSample};
pub use storage_report::{prepare_storage_report, DiskOverThreshold, NewStorageReport};

/// Payload key carrying the reporting server's network address.
pub const SERVER_ADDRESS_FIELD: &str = "server_ip";

/// Display name given to a server the first time its address is seen.
///
/// Uses the last dot-separated segment: `10.0.0.42` -> `server-42`.
/// Addresses without a dot keep the whole address as the suffix.
pub fn default_hostname(address: &str) -> String {
    let suffix = address.rsplit('.').next().unwrap_or(address);
    format!("server-{suffix}")
}
