//! Interval reconstruction: turns one user's punch events into the intervals
//! that tile `[first event, as_of]`.
//!
//! Pure and re-entrant. Nothing here touches the store, so the same function
//! serves single days, custom ranges and "all time".

use crate::models::activity::ActivityCatalog;
use crate::models::interval::Interval;
use crate::models::punch::PunchEvent;
use crate::utils::time::elapsed_seconds;
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct Timeline {
    pub events: Vec<PunchEvent>,
    pub intervals: Vec<Interval>,
    pub total_work_seconds: i64,
}

impl Timeline {
    /// The interval of the most recent event, open or not.
    pub fn last(&self) -> Option<&Interval> {
        self.intervals.last()
    }

    pub fn total_seconds(&self) -> i64 {
        self.intervals.iter().map(|i| i.duration_seconds).sum()
    }

    /// Work seconds per calendar day of interval start.
    pub fn work_seconds_by_day(&self) -> BTreeMap<NaiveDate, i64> {
        self.seconds_by_day(true)
    }

    pub fn non_work_seconds_by_day(&self) -> BTreeMap<NaiveDate, i64> {
        self.seconds_by_day(false)
    }

    fn seconds_by_day(&self, work: bool) -> BTreeMap<NaiveDate, i64> {
        let mut out = BTreeMap::new();
        for iv in self.intervals.iter().filter(|i| i.counts_as_work == work) {
            *out.entry(iv.day()).or_insert(0) += iv.duration_seconds;
        }
        out
    }
}

/// Sort into the canonical `(timestamp, id)` order. Ties on the timestamp
/// resolve by insertion order, so the order is total.
pub fn sort_events(events: &mut [PunchEvent]) {
    events.sort_by_key(|e| e.order_key());
}

/// Build the timeline of a single user.
///
/// Interval `i` ends where event `i + 1` starts; the last one ends at `as_of`
/// and is open. An end before its start (as_of in the past) yields a zero
/// duration but the interval is still reported.
pub fn build_timeline(
    events: &[PunchEvent],
    catalog: &ActivityCatalog,
    as_of: NaiveDateTime,
) -> Timeline {
    if events.is_empty() {
        return Timeline::default();
    }

    // -----------------------------
    // Sort events chronologically
    // -----------------------------
    let mut sorted = events.to_vec();
    sort_events(&mut sorted);

    let mut intervals = Vec::with_capacity(sorted.len());
    let mut total_work = 0;

    for (i, ev) in sorted.iter().enumerate() {
        let next = sorted.get(i + 1);
        let end = next.map(|n| n.timestamp).unwrap_or(as_of);

        if end < ev.timestamp {
            debug!(
                "interval of event {} (user {}) ends before it starts; clamping to zero",
                ev.id, ev.user_id
            );
        }

        let counts_as_work = catalog.counts_as_work(ev.activity_type_id);
        let duration_seconds = elapsed_seconds(ev.timestamp, end);
        if counts_as_work {
            total_work += duration_seconds;
        }

        intervals.push(Interval {
            event_id: ev.id,
            user_id: ev.user_id,
            activity_type_id: ev.activity_type_id,
            activity: catalog.label(ev.activity_type_id).to_string(),
            counts_as_work,
            start: ev.timestamp,
            end,
            duration_seconds,
            open: next.is_none(),
        });
    }

    Timeline {
        events: sorted,
        intervals,
        total_work_seconds: total_work,
    }
}

/// Partition a mixed event stream by user; each group keeps canonical order.
pub fn group_by_user(events: Vec<PunchEvent>) -> BTreeMap<i64, Vec<PunchEvent>> {
    let mut out: BTreeMap<i64, Vec<PunchEvent>> = BTreeMap::new();
    for ev in events {
        out.entry(ev.user_id).or_default().push(ev);
    }
    for group in out.values_mut() {
        sort_events(group);
    }
    out
}
