use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::utils::time::seconds_to_hours;

/// Span between one punch event and the next one of the same user
/// (or the as-of instant when there is no successor yet). Never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Interval {
    pub event_id: i64,
    pub user_id: i64,
    pub activity_type_id: i64,
    pub activity: String,
    pub counts_as_work: bool,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_seconds: i64, // clamped at zero
    pub open: bool,
}

impl Interval {
    pub fn duration_hours(&self) -> f64 {
        seconds_to_hours(self.duration_seconds)
    }

    /// Calendar day the interval is attributed to.
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }
}
