//! Timestamp parsing and display.
//!
//! Timestamps arrive as free-form strings. Parsing accepts RFC 3339, a naive
//! `YYYY-MM-DDTHH:MM:SS[.fff]` date-time and a bare `YYYY-MM-DD` date. Values
//! without an offset are read as UTC so results never depend on the host zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Display format used for exports: comma-free and zone-independent.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a timestamp string into a UTC instant.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// UTC day of month (1-31), if the timestamp parses.
pub fn day_of_month(s: &str) -> Option<u32> {
    use chrono::Datelike;
    parse_timestamp(s).map(|dt| dt.day())
}

/// Milliseconds since the Unix epoch, if the timestamp parses.
pub fn epoch_millis(s: &str) -> Option<i64> {
    parse_timestamp(s).map(|dt| dt.timestamp_millis())
}

/// Render a timestamp for display, or `Invalid Date` if it does not parse.
pub fn format_timestamp(s: &str) -> String {
    match parse_timestamp(s) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => "Invalid Date".to_string(),
    }
}
