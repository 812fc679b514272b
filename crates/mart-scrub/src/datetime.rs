//! Permissive date/time parsing for the derived `StandardDateTime` column.
//!
//! Raw extracts carry dates in whatever shape the upstream system emitted.
//! Parsing cascades from full datetimes to date-only formats; the derived
//! column is always written as ISO 8601 text.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Fixed name of the derived datetime column.
pub const STANDARD_DATETIME_COLUMN: &str = "StandardDateTime";

/// Parse a date/time string, trying datetime formats first, then date-only
/// formats (midnight assumed). Returns None for empty or unparseable input.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_datetime(trimmed)
        .or_else(|| try_parse_date(trimmed).map(|d| d.and_time(NaiveTime::MIN)))
}

/// Format a datetime as ISO 8601 extended (`YYYY-MM-DDTHH:MM:SS`).
pub fn to_iso8601(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S", // US
        "%m/%d/%Y %H:%M",
    ];
    for fmt in &formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    None
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d-%b-%Y", // 15-Jan-2024
        "%m/%d/%Y", // US: 01/15/2024
    ];
    for fmt in &formats {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d);
        }
    }
    None
}

/// Parse a date-only value, accepting the same formats as [`parse_datetime`]
/// and truncating any time component.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_datetime(value).map(|dt| dt.date())
}
