//! Clamping helpers for caller-supplied list parameters.

/// Default page size for raw health sample listings.
pub const DEFAULT_SAMPLE_LIMIT: i64 = 50;

/// Upper bound for raw health sample listings.
pub const MAX_SAMPLE_LIMIT: i64 = 500;

/// Default page size for storage report listings.
pub const DEFAULT_STORAGE_LIMIT: i64 = 10;

/// Upper bound for storage report listings.
pub const MAX_STORAGE_LIMIT: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
