//! Time utilities: parsing timestamps, duration computations, formatting hours, etc.
//!
//! All duration math happens here, on local wall-clock timestamps. The store only
//! keeps the text; it is never asked for "now" or for a difference of two dates.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ACCEPTED_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a stored or user-supplied timestamp into local wall-clock time.
/// RFC 3339 values carrying an offset are converted to the local zone first.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    for fmt in ACCEPTED_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn now() -> NaiveDateTime {
    // stored precision is one second
    let ts = Local::now().naive_local();
    ts.with_nanosecond(0).unwrap_or(ts)
}

/// `--at` override or the wall clock.
pub fn resolve_at(input: Option<&String>) -> AppResult<NaiveDateTime> {
    match input {
        Some(s) => parse_timestamp(s).ok_or_else(|| AppError::InvalidTimestamp(s.to_string())),
        None => Ok(now()),
    }
}

/// Elapsed seconds from `start` to `end`, clamped at zero.
pub fn elapsed_seconds(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_seconds().max(0)
}

pub fn seconds_to_hours(secs: i64) -> f64 {
    secs as f64 / 3600.0
}

/// Last second of the given calendar day.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
}

/// "8h 05m 12s"
pub fn format_elapsed(secs: i64) -> String {
    let s = secs.max(0);
    format!("{}h {:02}m {:02}s", s / 3600, (s % 3600) / 60, s % 60)
}
