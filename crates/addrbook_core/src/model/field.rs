//! Validated field values carried by a contact record.
//!
//! # Responsibility
//! - Wrap the scalar values of a contact (`Name`, `Phone`, `Birthday`).
//! - Enforce value-level validation at construction time.
//!
//! # Invariants
//! - A `Phone` always holds exactly 10 ASCII decimal digits.
//! - A `Birthday` built through `Birthday::parse` is always a real calendar
//!   date.
//! - `Birthday::from_parts` does not check calendar validity; consumers that
//!   need a date must go through `Birthday::to_date`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// External date pattern used for both parsing and rendering.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Number of digits a phone value must contain.
pub const PHONE_DIGITS: usize = 10;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2})\.([0-9]{2})\.([0-9]{4})$").expect("valid date regex")
});

/// Field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Phone value is not exactly 10 ASCII digits.
    InvalidPhone { value: String },
    /// Date text does not match `DD.MM.YYYY`.
    InvalidDate { value: String },
    /// Date components do not form a real calendar date.
    InvalidCalendarDate { day: u32, month: u32, year: i32 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPhone { value } => write!(
                f,
                "invalid phone `{value}`: expected exactly {PHONE_DIGITS} digits"
            ),
            Self::InvalidDate { value } => {
                write!(f, "invalid date `{value}`: expected DD.MM.YYYY")
            }
            Self::InvalidCalendarDate { day, month, year } => write!(
                f,
                "invalid calendar date {day:02}.{month:02}.{year:04}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Contact display name. No validation beyond being a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn render(&self) -> String {
        self.0.clone()
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ten-digit phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Validates and wraps a raw phone value.
    ///
    /// # Errors
    /// - `ValidationError::InvalidPhone` unless `raw` is exactly 10 ASCII digits.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if !PHONE_RE.is_match(&raw) {
            return Err(ValidationError::InvalidPhone { value: raw });
        }
        Ok(Self(raw))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn render(&self) -> String {
        self.0.clone()
    }
}

impl Display for Phone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Phone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Phone::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Birthday as day/month/year components.
///
/// Components are kept as stored so that a persisted value which is not a
/// real date (e.g. `31.02.1990`) can still be loaded and reported later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday {
    day: u32,
    month: u32,
    year: i32,
}

impl Birthday {
    /// Parses strict `DD.MM.YYYY` text into a calendar-valid birthday.
    ///
    /// # Errors
    /// - `InvalidDate` when the text shape does not match.
    /// - `InvalidCalendarDate` when the components are not a real date.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let birthday = Self::parse_components(text)?;
        birthday.to_date()?;
        Ok(birthday)
    }

    /// Parses `DD.MM.YYYY` shape only, without calendar validation.
    ///
    /// Used by storage read paths; see module invariants.
    pub fn parse_components(text: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDate {
            value: text.to_string(),
        };
        let captures = DATE_RE.captures(text).ok_or_else(invalid)?;
        let day = captures[1].parse::<u32>().map_err(|_| invalid())?;
        let month = captures[2].parse::<u32>().map_err(|_| invalid())?;
        let year = captures[3].parse::<i32>().map_err(|_| invalid())?;
        Ok(Self::from_parts(day, month, year))
    }

    /// Builds a birthday from raw components without validation.
    pub fn from_parts(day: u32, month: u32, year: i32) -> Self {
        Self { day, month, year }
    }

    /// Normalizes to a calendar date.
    ///
    /// # Errors
    /// - `InvalidCalendarDate` when the components are out of range.
    pub fn to_date(&self) -> Result<NaiveDate, ValidationError> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or(
            ValidationError::InvalidCalendarDate {
                day: self.day,
                month: self.month,
                year: self.year,
            },
        )
    }

    /// Renders as `DD.MM.YYYY`.
    pub fn render(&self) -> String {
        format!("{:02}.{:02}.{:04}", self.day, self.month, self.year)
    }
}

impl Display for Birthday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::{Birthday, Name, Phone, ValidationError};
    use chrono::NaiveDate;

    #[test]
    fn phone_accepts_ten_digits_and_renders_unchanged() {
        for raw in ["0123456789", "9999999999", "0000000000"] {
            let phone = Phone::new(raw).expect("ten digits should be valid");
            assert_eq!(phone.render(), raw);
        }
    }

    #[test]
    fn phone_rejects_everything_else() {
        for raw in [
            "",
            "123456789",
            "12345678901",
            "12345-67890",
            "+380123456",
            "abcdefghij",
            " 123456789",
            "١٢٣٤٥٦٧٨٩٠",
        ] {
            let err = Phone::new(raw).expect_err("value must be rejected");
            assert_eq!(
                err,
                ValidationError::InvalidPhone {
                    value: raw.to_string()
                }
            );
        }
    }

    #[test]
    fn phone_error_message_names_value_and_constraint() {
        let message = Phone::new("12").unwrap_err().to_string();
        assert!(message.contains("`12`"));
        assert!(message.contains("10 digits"));
    }

    #[test]
    fn birthday_parse_is_strict() {
        let birthday = Birthday::parse("08.06.1990").expect("valid date");
        assert_eq!(
            birthday.to_date().unwrap(),
            NaiveDate::from_ymd_opt(1990, 6, 8).unwrap()
        );
        assert_eq!(birthday.render(), "08.06.1990");

        for text in [
            "8.6.1990",
            "1990-06-08",
            "08/06/1990",
            "08.06.90",
            "",
            " 08.06.1990",
            "08.06.1990\n",
        ] {
            assert!(matches!(
                Birthday::parse(text),
                Err(ValidationError::InvalidDate { .. })
            ));
        }
        assert_eq!(
            Birthday::parse("31.02.1990").unwrap_err(),
            ValidationError::InvalidCalendarDate {
                day: 31,
                month: 2,
                year: 1990
            }
        );
    }

    #[test]
    fn parse_components_keeps_calendar_invalid_values() {
        let birthday = Birthday::parse_components("31.02.1990").expect("shape is valid");
        assert_eq!(birthday.render(), "31.02.1990");
        assert!(birthday.to_date().is_err());
    }

    #[test]
    fn name_renders_raw_value() {
        assert_eq!(Name::new("Alice").render(), "Alice");
    }
}
