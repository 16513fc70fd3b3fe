//! Domain logic for the fleet health collector.
//!
//! Everything in this crate is pure: no database access, no I/O. The `db`
//! crate persists what the `ingest` module validates, and the `api` crate
//! composes read models with the helpers in [`monitoring`].

pub mod error;
pub mod ingest;
pub mod monitoring;
pub mod paging;
pub mod types;
