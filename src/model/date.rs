//! Entry dates
//!
//! Dates written by PulseTrack are ISO `YYYY-MM-DD` strings. Documents
//! written by older front-ends may carry locale strings (`3/1/2024`) or full
//! timestamps, so parsing accepts a handful of shapes. Parsing is only used
//! to order entries; the stored string is never rewritten.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format used for every date this crate produces
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_ONLY_FORMATS: &[&str] = &[DATE_FORMAT, "%m/%d/%Y", "%Y/%m/%d"];

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Format a calendar date the way entries store it
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse an entry date into a point in time
///
/// Returns `None` for blank or unrecognised input.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    DATE_ONLY_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
