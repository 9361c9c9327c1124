//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate directory edits, persistence and birthday reports into
//!   command-level APIs.
//! - Keep the CLI layer decoupled from storage details.

pub mod contact_service;
