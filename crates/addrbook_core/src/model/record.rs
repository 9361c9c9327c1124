//! Contact record model.
//!
//! # Responsibility
//! - Hold one contact: name, ordered phones, optional birthday.
//! - Validate phone input on every write path.
//!
//! # Invariants
//! - A record always has a name; phones keep insertion order.
//! - Duplicate phones are allowed.
//! - Missing phones on remove/edit are not errors.

use crate::model::field::{Birthday, Name, Phone, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Marker rendered when no birthday is stored.
pub const NO_BIRTHDAY: &str = "-";

/// One contact entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: Name,
    phones: Vec<Phone>,
    birthday: Option<Birthday>,
}

impl Record {
    /// Creates a record with its first phone.
    ///
    /// # Errors
    /// - `ValidationError::InvalidPhone` when `phone` is not 10 digits.
    pub fn new(
        name: impl Into<String>,
        phone: &str,
        birthday: Option<Birthday>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: Name::new(name),
            phones: vec![Phone::new(phone)?],
            birthday,
        })
    }

    /// Rebuilds a record from already validated parts (storage read path).
    pub fn from_parts(name: Name, phones: Vec<Phone>, birthday: Option<Birthday>) -> Self {
        Self {
            name,
            phones,
            birthday,
        }
    }

    pub fn name(&self) -> &str {
        self.name.value()
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    /// Only `Directory::rename` should call this, so the key stays in sync.
    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = Name::new(name);
    }

    pub fn add_phone(&mut self, phone: &str) -> Result<(), ValidationError> {
        self.phones.push(Phone::new(phone)?);
        Ok(())
    }

    /// Removes the first exact match. Returns whether a phone was removed.
    pub fn remove_phone(&mut self, phone: &str) -> bool {
        match self.phones.iter().position(|p| p.value() == phone) {
            Some(index) => {
                self.phones.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replaces the first entry equal to `old` with `new`.
    ///
    /// Returns `Ok(false)` without changes when `old` is absent.
    ///
    /// # Errors
    /// - `ValidationError::InvalidPhone` when `new` is invalid, checked
    ///   before looking up `old`.
    pub fn edit_phone(&mut self, old: &str, new: &str) -> Result<bool, ValidationError> {
        let replacement = Phone::new(new)?;
        match self.phones.iter_mut().find(|p| p.value() == old) {
            Some(slot) => {
                *slot = replacement;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn find_phone(&self, phone: &str) -> Option<&Phone> {
        self.phones.iter().find(|p| p.value() == phone)
    }

    pub fn set_birthday(&mut self, birthday: Birthday) {
        self.birthday = Some(birthday);
    }

    pub fn edit_birthday(&mut self, birthday: Birthday) {
        self.set_birthday(birthday);
    }

    /// Renders `Contact name: .., phones: a; b, birthday: ..`.
    pub fn render(&self) -> String {
        let phones = self
            .phones
            .iter()
            .map(Phone::value)
            .collect::<Vec<_>>()
            .join("; ");
        let birthday = self
            .birthday
            .map(|b| b.render())
            .unwrap_or_else(|| NO_BIRTHDAY.to_string());
        format!(
            "Contact name: {}, phones: {}, birthday: {}",
            self.name, phones, birthday
        )
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::Record;
    use crate::model::field::{Birthday, ValidationError};

    fn phones(record: &Record) -> Vec<&str> {
        record.phones().iter().map(|p| p.value()).collect()
    }

    #[test]
    fn new_rejects_invalid_first_phone() {
        let err = Record::new("Bob", "123", None).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPhone { .. }));
    }

    #[test]
    fn remove_phone_drops_first_match_only() {
        let mut record = Record::new("Bob", "1111111111", None).unwrap();
        record.add_phone("2222222222").unwrap();
        record.add_phone("1111111111").unwrap();

        assert!(record.remove_phone("1111111111"));
        assert_eq!(phones(&record), vec!["2222222222", "1111111111"]);
        assert!(!record.remove_phone("3333333333"));
        assert_eq!(phones(&record), vec!["2222222222", "1111111111"]);
    }

    #[test]
    fn edit_phone_replaces_in_place_or_reports_absence() {
        let mut record = Record::new("Bob", "1111111111", None).unwrap();
        record.add_phone("2222222222").unwrap();

        assert!(record.edit_phone("1111111111", "3333333333").unwrap());
        assert_eq!(phones(&record), vec!["3333333333", "2222222222"]);

        assert!(!record.edit_phone("9999999999", "4444444444").unwrap());
        assert_eq!(phones(&record), vec!["3333333333", "2222222222"]);

        assert!(record.edit_phone("2222222222", "bad").is_err());
        assert_eq!(phones(&record), vec!["3333333333", "2222222222"]);
    }

    #[test]
    fn find_phone_returns_first_exact_match() {
        let record = Record::new("Bob", "1111111111", None).unwrap();
        assert_eq!(
            record.find_phone("1111111111").map(|p| p.value()),
            Some("1111111111")
        );
        assert!(record.find_phone("111111111").is_none());
    }

    #[test]
    fn render_joins_phones_and_marks_missing_birthday() {
        let mut record = Record::new("Bob", "1111111111", None).unwrap();
        record.add_phone("2222222222").unwrap();
        assert_eq!(
            record.render(),
            "Contact name: Bob, phones: 1111111111; 2222222222, birthday: -"
        );

        record.set_birthday(Birthday::parse("01.02.2000").unwrap());
        record.edit_birthday(Birthday::parse("03.04.2001").unwrap());
        assert!(record.render().ends_with("birthday: 03.04.2001"));
    }
}
