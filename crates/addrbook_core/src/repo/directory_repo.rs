//! Directory snapshot persistence over SQLite.
//!
//! # Responsibility
//! - Load and save the whole `Directory` as one snapshot file.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `save` replaces the previous snapshot in a single transaction.
//! - Loading a missing file yields an empty directory and creates nothing.
//! - Phone order per record survives a save/load round trip.
//! - Read paths re-validate phones and reject malformed birthday text.
//!   Birthdays that are well-formed but not real dates are kept as stored.

use crate::db::{open_db, DbError};
use crate::model::directory::Directory;
use crate::model::field::{Birthday, Name, Phone, ValidationError};
use crate::model::record::Record;
use log::{error, info};
use rusqlite::{params, Connection, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for directory snapshots.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted contact data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Snapshot store for a whole directory.
pub trait DirectoryStore {
    fn load_directory(&self) -> RepoResult<Directory>;
    fn save_directory(&mut self, directory: &Directory) -> RepoResult<()>;
}

/// SQLite-backed directory store.
pub struct SqliteDirectoryStore<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteDirectoryStore<'conn> {
    /// Constructs a store from a connection opened by `open_db*`.
    ///
    /// # Errors
    /// - `RepoError::InvalidData` when the contact tables are missing.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        for table in ["contacts", "contact_phones"] {
            if !table_exists(conn, table)? {
                return Err(RepoError::InvalidData(format!(
                    "missing required table `{table}`"
                )));
            }
        }
        Ok(Self { conn })
    }
}

impl DirectoryStore for SqliteDirectoryStore<'_> {
    fn load_directory(&self) -> RepoResult<Directory> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, birthday FROM contacts ORDER BY name ASC;")?;
        let mut rows = stmt.query([])?;
        let mut directory = Directory::new();

        while let Some(row) = rows.next()? {
            let name: String = row.get("name")?;
            let birthday = match row.get::<_, Option<String>>("birthday")? {
                Some(text) => Some(Birthday::parse_components(&text).map_err(|_| {
                    RepoError::InvalidData(format!(
                        "invalid birthday `{text}` in contacts.birthday for `{name}`"
                    ))
                })?),
                None => None,
            };
            let phones = load_phones(self.conn, &name)?;
            directory.upsert(Record::from_parts(Name::new(name), phones, birthday));
        }

        Ok(directory)
    }

    fn save_directory(&mut self, directory: &Directory) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM contact_phones;", [])?;
        tx.execute("DELETE FROM contacts;", [])?;

        for record in directory.iter() {
            tx.execute(
                "INSERT INTO contacts (name, birthday) VALUES (?1, ?2);",
                params![record.name(), record.birthday().map(Birthday::render)],
            )?;
            for (position, phone) in record.phones().iter().enumerate() {
                tx.execute(
                    "INSERT INTO contact_phones (contact_name, position, phone)
                     VALUES (?1, ?2, ?3);",
                    params![record.name(), position as i64, phone.value()],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}

impl Directory {
    /// Loads a directory snapshot from `path`.
    ///
    /// A missing file is not an error: an empty directory is returned and no
    /// file is created.
    ///
    /// # Errors
    /// - `RepoError::Db` when the file cannot be opened or has an unknown format.
    /// - `RepoError::InvalidData` when stored rows are malformed.
    pub fn load(path: impl AsRef<Path>) -> RepoResult<Directory> {
        let path = path.as_ref();
        let started_at = Instant::now();
        if !path.exists() {
            info!("event=directory_load module=repo status=skip reason=missing_file");
            return Ok(Directory::new());
        }

        let result = load_snapshot(path);
        match &result {
            Ok(directory) => info!(
                "event=directory_load module=repo status=ok contacts={} duration_ms={}",
                directory.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=directory_load module=repo status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    /// Saves the full directory to `path`, replacing any previous snapshot.
    ///
    /// # Errors
    /// - `RepoError::Db` when the file cannot be opened or written. The
    ///   previous snapshot stays intact in that case.
    pub fn save(&self, path: impl AsRef<Path>) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = save_snapshot(path.as_ref(), self);
        match &result {
            Ok(()) => info!(
                "event=directory_save module=repo status=ok contacts={} duration_ms={}",
                self.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=directory_save module=repo status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn load_snapshot(path: &Path) -> RepoResult<Directory> {
    let mut conn = open_db(path)?;
    let store = SqliteDirectoryStore::try_new(&mut conn)?;
    store.load_directory()
}

fn save_snapshot(path: &Path, directory: &Directory) -> RepoResult<()> {
    let mut conn = open_db(path)?;
    let mut store = SqliteDirectoryStore::try_new(&mut conn)?;
    store.save_directory(directory)
}

fn load_phones(conn: &Connection, name: &str) -> RepoResult<Vec<Phone>> {
    let mut stmt = conn.prepare(
        "SELECT phone
         FROM contact_phones
         WHERE contact_name = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([name])?;
    let mut phones = Vec::new();
    while let Some(row) = rows.next()? {
        let value: String = row.get(0)?;
        let phone = Phone::new(value).map_err(|err| {
            RepoError::InvalidData(format!(
                "{err} in contact_phones.phone for `{name}`"
            ))
        })?;
        phones.push(phone);
    }
    Ok(phones)
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
