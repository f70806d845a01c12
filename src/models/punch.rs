use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::utils::time::format_timestamp;

/// One row of the append-only event log.
///
/// Ordering key is `(user_id, timestamp)`; equal timestamps are ordered by `id`,
/// which grows with insertion order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PunchEvent {
    pub id: i64,
    pub user_id: i64,
    pub activity_type_id: i64,
    pub timestamp: NaiveDateTime, // ⇔ punch_events.ts (TEXT "YYYY-MM-DD HH:MM:SS", local time)
    pub comment: Option<String>,
}

impl PunchEvent {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn timestamp_str(&self) -> String {
        format_timestamp(&self.timestamp)
    }

    /// Total order used everywhere events are sequenced.
    pub fn order_key(&self) -> (NaiveDateTime, i64) {
        (self.timestamp, self.id)
    }
}

/// A clock action that has not been written yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPunch {
    pub user_id: i64,
    pub activity_type_id: i64,
    pub timestamp: NaiveDateTime,
    pub comment: Option<String>,
}
