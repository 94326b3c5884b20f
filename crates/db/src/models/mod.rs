//! Database row structs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row, plus a conversion into the corresponding
//! `kinscreen-core` domain type where the core engine consumes it.

pub mod activity_profile;
pub mod compound;
pub mod kinase;

pub use activity_profile::ActivityProfileRow;
pub use compound::CompoundRow;
pub use kinase::KinaseRow;
