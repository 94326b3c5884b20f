//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod activity_profile_repo;
pub mod compound_repo;
pub mod kinase_repo;

pub use activity_profile_repo::ActivityProfileRepo;
pub use compound_repo::CompoundRepo;
pub use kinase_repo::KinaseRepo;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 500;

/// Clamp a caller-supplied limit into [1, MAX_LIMIT].
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a caller-supplied offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
