//! SQLite file backing the address book snapshot.
//!
//! # Responsibility
//! - Open the snapshot file (or an in-memory stand-in) ready for contacts.
//! - Refuse files written with a different snapshot layout.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// File is stamped with a layout this binary cannot read.
    UnknownSnapshotFormat { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "snapshot storage error: {err}"),
            Self::UnknownSnapshotFormat { found, supported } => write!(
                f,
                "address book file uses snapshot format {found}; this build reads format {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnknownSnapshotFormat { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
