//! In-memory contact directory.
//!
//! # Responsibility
//! - Own every `Record` keyed by its name.
//! - Provide upsert/remove/rename/get/all over that map.
//!
//! # Invariants
//! - At most one record per name; the key always equals `record.name()`.
//! - Operations on a missing name are no-ops or return `None`.
//! - Iteration order is by name.

use crate::model::record::Record;
use std::collections::BTreeMap;

/// Name-to-record collection with process-wide lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    records: BTreeMap<String, Record>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` under its name, replacing any previous entry.
    ///
    /// Returns the replaced record, if any.
    pub fn upsert(&mut self, record: Record) -> Option<Record> {
        self.records.insert(record.name().to_string(), record)
    }

    /// Removes and returns the record stored under `name`.
    pub fn remove(&mut self, name: &str) -> Option<Record> {
        self.records.remove(name)
    }

    /// Moves the record at `old_name` to `new_name`.
    ///
    /// Updates the record's own name together with the key and overwrites
    /// any record already stored at `new_name`. Returns `false` without
    /// changes when `old_name` is absent.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> bool {
        if old_name == new_name {
            return self.records.contains_key(old_name);
        }
        let Some(mut record) = self.records.remove(old_name) else {
            return false;
        };
        record.set_name(new_name);
        self.records.insert(new_name.to_string(), record);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    /// Mutable access for phone/birthday edits. Renames go through `rename`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    /// Snapshot view of all records in name order.
    pub fn all(&self) -> Vec<&Record> {
        self.records.values().collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for Directory {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        let mut directory = Directory::new();
        for record in iter {
            directory.upsert(record);
        }
        directory
    }
}
