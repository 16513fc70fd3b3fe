//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` (or a connection already inside a transaction)
//! as the first argument.

pub mod fleet_repo;
pub mod health_sample_repo;
pub mod server_repo;
pub mod storage_report_repo;

pub use fleet_repo::FleetRepo;
pub use health_sample_repo::HealthSampleRepo;
pub use server_repo::ServerRepo;
pub use storage_report_repo::StorageReportRepo;
