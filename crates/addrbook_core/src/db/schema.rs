//! Contact snapshot schema.
//!
//! The file carries one fixed table layout stamped with
//! `SNAPSHOT_FORMAT_VERSION` in `PRAGMA user_version`. There is no upgrade
//! path: a fresh file is stamped, a matching file is used as is, anything
//! else is refused.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Snapshot layout written by this binary.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

const CONTACTS_SQL: &str = include_str!("contacts.sql");

/// Creates the contact tables in a fresh file or checks an existing one.
///
/// # Errors
/// - `DbError::UnknownSnapshotFormat` when the file is stamped with a
///   different layout version.
pub fn ensure_contact_schema(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    match found {
        SNAPSHOT_FORMAT_VERSION => Ok(()),
        0 => {
            let tx = conn.transaction()?;
            tx.execute_batch(CONTACTS_SQL)?;
            tx.execute_batch(&format!(
                "PRAGMA user_version = {SNAPSHOT_FORMAT_VERSION};"
            ))?;
            tx.commit()?;
            Ok(())
        }
        other => Err(DbError::UnknownSnapshotFormat {
            found: other,
            supported: SNAPSHOT_FORMAT_VERSION,
        }),
    }
}
