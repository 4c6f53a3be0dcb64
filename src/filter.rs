//! Status and weekday filtering of access records.
//!
//! A record is kept when its status is one of [`ERROR_STATUS_CODES`] and its
//! timestamp falls on Monday through Friday.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::config::{ERROR_STATUS_CODES, MONTH_TABLE};
use crate::parse::AccessRecord;

/// Returns true if `status` is in the server error set.
pub fn is_error_status(status: u16) -> bool {
    ERROR_STATUS_CODES.contains(&status)
}

/// Looks up a three-letter month abbreviation (case-sensitive, `Jan`..`Dec`).
fn month_number(abbrev: &str) -> Option<u32> {
    MONTH_TABLE
        .iter()
        .find(|(name, _)| *name == abbrev)
        .map(|(_, number)| *number)
}

fn parse_digits<T: std::str::FromStr>(s: &str) -> Option<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Extracts the calendar date from a log timestamp.
///
/// Fixed offsets into `DD/Mon/YYYY:...`: day at 0..2, month at 3..6, year at
/// 7..11. Anything that does not fit, including impossible dates such as
/// `31/Feb`, yields `None`.
pub fn timestamp_date(timestamp: &str) -> Option<NaiveDate> {
    let day = parse_digits::<u32>(timestamp.get(0..2)?)?;
    let month = month_number(timestamp.get(3..6)?)?;
    let year = parse_digits::<i32>(timestamp.get(7..11)?)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Returns true if the timestamp falls on a weekday. Malformed timestamps fail closed.
pub fn is_weekday(timestamp: &str) -> bool {
    match timestamp_date(timestamp) {
        Some(date) => !matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        None => {
            log::debug!("Unparseable timestamp treated as non-matching: {:?}", timestamp);
            false
        }
    }
}

/// Returns true if the record is a weekday server error.
pub fn matches(record: &AccessRecord) -> bool {
    is_error_status(record.status) && is_weekday(&record.time)
}

/// Lazily keeps the matching records, in input order.
pub fn filter_records<I>(records: I) -> impl Iterator<Item = AccessRecord>
where
    I: IntoIterator<Item = AccessRecord>,
{
    records.into_iter().filter(matches)
}

/// Hosts of all weekday server error records, in input order, duplicates kept.
pub fn normalized_hosts<I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = AccessRecord>,
{
    filter_records(records).map(|record| record.host).collect()
}
