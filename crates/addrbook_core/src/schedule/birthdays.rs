//! Upcoming-birthday computation.
//!
//! # Responsibility
//! - Normalize record birthdays into calendar dates (`prepare`).
//! - Select birthdays inside a day horizon and move weekend dates to the
//!   following Monday (`upcoming`).
//!
//! # Invariants
//! - Pure over its inputs: records are never mutated and `today` is passed in.
//! - Output order follows input order.
//! - One malformed birthday never aborts the whole computation.

use crate::model::field::{ValidationError, DATE_FORMAT};
use crate::model::record::Record;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use log::{debug, warn};
use serde::Serialize;

/// Default look-ahead window in days (inclusive).
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Record name paired with its normalized birthday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedBirthday {
    pub name: String,
    pub birthday: NaiveDate,
}

/// Record whose stored birthday could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayRejection {
    pub name: String,
    pub error: ValidationError,
}

/// Full result of the prepare stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareReport {
    pub prepared: Vec<PreparedBirthday>,
    pub rejected: Vec<BirthdayRejection>,
}

/// Report row: who to congratulate and when (`DD.MM.YYYY`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingBirthday {
    pub name: String,
    pub congratulation_date: String,
}

/// Normalizes birthdays of `records`, keeping only convertible ones.
///
/// Records without a birthday are skipped silently; malformed birthdays are
/// logged and skipped. Use `prepare_report` to receive the rejections.
pub fn prepare<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<PreparedBirthday> {
    prepare_report(records).prepared
}

/// Same as `prepare`, also returning per-record conversion failures.
pub fn prepare_report<'a>(records: impl IntoIterator<Item = &'a Record>) -> PrepareReport {
    let mut report = PrepareReport::default();
    let mut absent = 0_usize;

    for record in records {
        let Some(birthday) = record.birthday() else {
            absent += 1;
            continue;
        };
        match birthday.to_date() {
            Ok(date) => report.prepared.push(PreparedBirthday {
                name: record.name().to_string(),
                birthday: date,
            }),
            Err(error) => {
                warn!(
                    "event=birthday_skip module=schedule status=skip reason=invalid_date error={}",
                    error
                );
                report.rejected.push(BirthdayRejection {
                    name: record.name().to_string(),
                    error,
                });
            }
        }
    }

    debug!(
        "event=birthday_prepare module=schedule status=ok prepared={} rejected={} absent={}",
        report.prepared.len(),
        report.rejected.len(),
        absent
    );
    report
}

/// Selects birthdays falling within `horizon_days` of `today`.
///
/// A birthday already past this year rolls over to next year. Saturday and
/// Sunday dates are moved to the following Monday.
pub fn upcoming(
    prepared: &[PreparedBirthday],
    horizon_days: u32,
    today: NaiveDate,
) -> Vec<UpcomingBirthday> {
    prepared
        .iter()
        .filter_map(|entry| {
            congratulation_date(entry.birthday, horizon_days, today).map(|date| {
                UpcomingBirthday {
                    name: entry.name.clone(),
                    congratulation_date: date.format(DATE_FORMAT).to_string(),
                }
            })
        })
        .collect()
}

/// Returns the adjusted congratulation date, or `None` outside the horizon.
pub fn congratulation_date(
    birthday: NaiveDate,
    horizon_days: u32,
    today: NaiveDate,
) -> Option<NaiveDate> {
    let mut next = anniversary_in(birthday, today.year())?;
    if next < today {
        next = anniversary_in(birthday, today.year() + 1)?;
    }

    let delta = (next - today).num_days();
    if !(0..=i64::from(horizon_days)).contains(&delta) {
        return None;
    }

    match next.weekday() {
        Weekday::Sat | Weekday::Sun => next_weekday(next, Weekday::Mon),
        _ => Some(next),
    }
}

/// Next date strictly after `date` that falls on `weekday`.
///
/// Same weekday input advances a full week.
pub fn next_weekday(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let current = i64::from(date.weekday().num_days_from_monday());
    let target = i64::from(weekday.num_days_from_monday());
    let mut days_ahead = target - current;
    if days_ahead <= 0 {
        days_ahead += 7;
    }
    date.checked_add_days(Days::new(days_ahead.unsigned_abs()))
}

// Feb 29 falls back to Feb 28 in non-leap years.
fn anniversary_in(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    birthday
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}
