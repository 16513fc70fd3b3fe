//! Fleet monitoring domain logic.
//!
//! Contains the critical-threshold classifier, the staleness evaluator, and
//! the small formatting/rollup helpers used by the dashboard read model.
//! All logic in this module is pure (no DB access), so "now" is always
//! passed in by the caller.

pub mod performance;
pub mod staleness;
pub mod thresholds;
pub mod uptime;
