//! Birthday scheduling over directory snapshots.
//!
//! # Responsibility
//! - Derive congratulation reports from records without mutating them.

pub mod birthdays;
