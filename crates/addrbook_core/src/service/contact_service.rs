//! Contact use-case service.
//!
//! # Responsibility
//! - Provide command-level entry points over one owned `Directory`.
//! - Translate missing names/phones into explicit outcomes, not errors.
//! - Delegate persistence to `Directory::load` / `Directory::save`.
//!
//! # Invariants
//! - Errors are reserved for invalid input and storage failures.
//! - Birthday text is parsed with the fixed `DD.MM.YYYY` pattern.

use crate::model::directory::Directory;
use crate::model::field::{Birthday, ValidationError};
use crate::model::record::Record;
use crate::repo::directory_repo::RepoError;
use crate::schedule::birthdays::{prepare_report, upcoming, BirthdayRejection, UpcomingBirthday};
use chrono::NaiveDate;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller input failed field validation.
    Validation(ValidationError),
    /// Snapshot load/save failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Result of adding a contact under a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Created,
    /// A contact with the same name existed and was replaced.
    Replaced,
}

/// Result of a change addressed by contact name (and maybe phone).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    Applied,
    ContactNotFound,
    PhoneNotFound,
}

/// Upcoming-birthday report plus records whose birthday was unusable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpcomingReport {
    pub upcoming: Vec<UpcomingBirthday>,
    pub rejected: Vec<BirthdayRejection>,
}

/// Use-case service owning the process-wide directory.
#[derive(Debug, Default)]
pub struct ContactService {
    directory: Directory,
}

impl ContactService {
    pub fn new(directory: Directory) -> Self {
        Self { directory }
    }

    /// Loads the snapshot at `path`; a missing file starts an empty book.
    pub fn open(path: impl AsRef<Path>) -> ServiceResult<Self> {
        Ok(Self::new(Directory::load(path)?))
    }

    /// Writes the whole directory to `path`, replacing prior content.
    pub fn save(&self, path: impl AsRef<Path>) -> ServiceResult<()> {
        self.directory.save(path)?;
        Ok(())
    }

    /// Creates a contact with one phone, replacing any same-named contact.
    pub fn add_contact(&mut self, name: &str, phone: &str) -> ServiceResult<AddOutcome> {
        let record = Record::new(name, phone, None)?;
        let outcome = match self.directory.upsert(record) {
            Some(_) => AddOutcome::Replaced,
            None => AddOutcome::Created,
        };
        debug!("event=contact_add module=service status=ok outcome={outcome:?}");
        Ok(outcome)
    }

    pub fn remove_contact(&mut self, name: &str) -> ChangeOutcome {
        match self.directory.remove(name) {
            Some(_) => ChangeOutcome::Applied,
            None => ChangeOutcome::ContactNotFound,
        }
    }

    pub fn change_name(&mut self, old_name: &str, new_name: &str) -> ChangeOutcome {
        if self.directory.rename(old_name, new_name) {
            ChangeOutcome::Applied
        } else {
            ChangeOutcome::ContactNotFound
        }
    }

    /// Replaces `old` with `new` in the contact's phone list.
    ///
    /// # Errors
    /// - `ServiceError::Validation` when `new` is not a valid phone.
    pub fn change_phone(
        &mut self,
        name: &str,
        old: &str,
        new: &str,
    ) -> ServiceResult<ChangeOutcome> {
        let Some(record) = self.directory.get_mut(name) else {
            return Ok(ChangeOutcome::ContactNotFound);
        };
        let outcome = if record.edit_phone(old, new)? {
            ChangeOutcome::Applied
        } else {
            ChangeOutcome::PhoneNotFound
        };
        debug!("event=phone_change module=service status=ok outcome={outcome:?}");
        Ok(outcome)
    }

    pub fn add_phone(&mut self, name: &str, phone: &str) -> ServiceResult<ChangeOutcome> {
        let Some(record) = self.directory.get_mut(name) else {
            return Ok(ChangeOutcome::ContactNotFound);
        };
        record.add_phone(phone)?;
        Ok(ChangeOutcome::Applied)
    }

    pub fn remove_phone(&mut self, name: &str, phone: &str) -> ChangeOutcome {
        let Some(record) = self.directory.get_mut(name) else {
            return ChangeOutcome::ContactNotFound;
        };
        if record.remove_phone(phone) {
            ChangeOutcome::Applied
        } else {
            ChangeOutcome::PhoneNotFound
        }
    }

    /// Parses `DD.MM.YYYY` text and stores it as the contact's birthday.
    ///
    /// Input is validated before the contact lookup, so a malformed date is
    /// reported even for unknown names.
    pub fn add_birthday(&mut self, name: &str, text: &str) -> ServiceResult<ChangeOutcome> {
        let birthday = Birthday::parse(text)?;
        Ok(self.with_record(name, |record| record.set_birthday(birthday)))
    }

    pub fn edit_birthday(&mut self, name: &str, text: &str) -> ServiceResult<ChangeOutcome> {
        let birthday = Birthday::parse(text)?;
        Ok(self.with_record(name, |record| record.edit_birthday(birthday)))
    }

    pub fn show_contact(&self, name: &str) -> Option<&Record> {
        self.directory.get(name)
    }

    pub fn all_contacts(&self) -> Vec<&Record> {
        self.directory.all()
    }

    /// Name and stored birthday of every contact, in directory order.
    pub fn birthdays(&self) -> Vec<(&str, Option<&Birthday>)> {
        self.directory
            .iter()
            .map(|record| (record.name(), record.birthday()))
            .collect()
    }

    /// Runs prepare + upcoming over the current directory snapshot.
    pub fn upcoming_birthdays(&self, today: NaiveDate, horizon_days: u32) -> UpcomingReport {
        let report = prepare_report(self.directory.iter());
        UpcomingReport {
            upcoming: upcoming(&report.prepared, horizon_days, today),
            rejected: report.rejected,
        }
    }

    fn with_record(&mut self, name: &str, apply: impl FnOnce(&mut Record)) -> ChangeOutcome {
        match self.directory.get_mut(name) {
            Some(record) => {
                apply(record);
                ChangeOutcome::Applied
            }
            None => ChangeOutcome::ContactNotFound,
        }
    }
}
