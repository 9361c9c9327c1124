//! Persistence gateway for directory snapshots.
//!
//! # Responsibility
//! - Define the snapshot store contract.
//! - Isolate SQLite details from model and service code.
//!
//! # Invariants
//! - Read paths reject corrupt rows with `RepoError::InvalidData`.

pub mod directory_repo;
