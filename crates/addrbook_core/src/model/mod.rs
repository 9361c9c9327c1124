//! Contact domain model.
//!
//! # Responsibility
//! - Define field values, records and the in-memory directory.
//! - Keep validation next to the data it protects.
//!
//! # Invariants
//! - Every record is keyed by its own name inside a `Directory`.
//! - Phone values are validated on every construction path.

pub mod directory;
pub mod field;
pub mod record;
