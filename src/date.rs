//! Display formatting for article timestamps

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub const NO_DATE: &str = "no date provided";
pub const INVALID_DATE: &str = "invalid date";

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Render a timestamp as a calendar date (`2024年3月20日`) in the local
/// timezone.
pub fn format_date(input: &str) -> String {
    format_date_in(input, &Local)
}

/// Render a timestamp as a calendar date in `tz`.
///
/// Never fails: empty input and unparseable input produce [`NO_DATE`] and
/// [`INVALID_DATE`] respectively.
pub fn format_date_in<Tz: TimeZone>(input: &str, tz: &Tz) -> String {
    if input.is_empty() {
        return NO_DATE.to_string();
    }

    match parse_timestamp(input.trim(), tz) {
        Some(instant) => {
            let date = instant.with_timezone(tz);
            format!("{}年{}月{}日", date.year(), date.month(), date.day())
        }
        None => INVALID_DATE.to_string(),
    }
}

/// Naive date-times are read in `tz`; a bare date is UTC midnight.
fn parse_timestamp<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
