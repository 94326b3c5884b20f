//! Pure domain logic for the kinase screening curation backend.
//!
//! This crate has no database, async, or I/O dependencies. It provides:
//!
//! - The domain model (compounds, kinases, activity profiles).
//! - Typed CSV row records and blank-field normalization.
//! - The [`resolver::ReferenceResolver`] trait for master-data lookups,
//!   with an in-memory snapshot implementation.
//! - The reconciliation engine: field-level, non-destructive merging of
//!   imported rows into the current record set, producing a per-field
//!   change report.

pub mod error;
pub mod model;
pub mod reconcile;
pub mod report;
pub mod resolver;
pub mod rows;
pub mod types;
