//! Row structs and read models.
//!
//! Each submodule contains `FromRow` + `Serialize` structs matching the
//! rows the repositories return. Insert DTOs are the validated types from
//! `fleetwatch_core::ingest`.

pub mod fleet;
pub mod health_sample;
pub mod server;
pub mod storage_report;
