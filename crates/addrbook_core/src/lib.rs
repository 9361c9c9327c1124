//! Core domain logic for the address book.
//! This crate owns contact invariants, persistence and birthday scheduling.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::directory::Directory;
pub use model::field::{Birthday, Name, Phone, ValidationError, DATE_FORMAT};
pub use model::record::Record;
pub use repo::directory_repo::{DirectoryStore, RepoError, RepoResult, SqliteDirectoryStore};
pub use schedule::birthdays::{
    congratulation_date, next_weekday, prepare, prepare_report, upcoming, BirthdayRejection,
    PrepareReport, PreparedBirthday, UpcomingBirthday, DEFAULT_HORIZON_DAYS,
};
pub use service::contact_service::{
    AddOutcome, ChangeOutcome, ContactService, ServiceError, ServiceResult, UpcomingReport,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
