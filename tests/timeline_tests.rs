use rpunchclock::core::calculator::timeline::build_timeline;
use rpunchclock::models::activity::{ActivityCatalog, ActivityType};
use rpunchclock::models::punch::PunchEvent;

mod common;
use common::ts;

const WORK: i64 = 1;
const BREAK: i64 = 2;
const END: i64 = 3;

fn catalog() -> ActivityCatalog {
    let act = |id, status: &str, work| ActivityType {
        id,
        status: status.into(),
        counts_as_work: work,
        comment: String::new(),
    };
    ActivityCatalog::new(vec![
        act(WORK, "Work", true),
        act(BREAK, "Break", false),
        act(END, "End of work", false),
    ])
}

fn ev(id: i64, activity_type_id: i64, at: &str) -> PunchEvent {
    PunchEvent {
        id,
        user_id: 7,
        activity_type_id,
        timestamp: ts(at),
        comment: None,
    }
}

#[test]
fn test_no_events_no_intervals() {
    let tl = build_timeline(&[], &catalog(), ts("2025-03-10 12:00:00"));
    assert!(tl.intervals.is_empty());
    assert_eq!(tl.total_work_seconds, 0);
    assert!(tl.last().is_none());
}

#[test]
fn test_work_then_end_of_work_is_eight_hours() {
    let events = vec![
        ev(1, WORK, "2025-03-10 09:00:00"),
        ev(2, END, "2025-03-10 17:00:00"),
    ];
    let tl = build_timeline(&events, &catalog(), ts("2025-03-10 18:00:00"));

    assert_eq!(tl.intervals.len(), 2);
    let first = &tl.intervals[0];
    assert!(first.counts_as_work);
    assert!(!first.open);
    assert_eq!(first.duration_seconds, 8 * 3600);
    assert_eq!(first.duration_hours(), 8.0);

    assert_eq!(tl.total_work_seconds, 8 * 3600);
    assert_eq!(tl.work_seconds_by_day().get(&ts("2025-03-10 00:00").date()), Some(&28_800));
}

#[test]
fn test_intervals_tile_history_up_to_as_of() {
    let events = vec![
        ev(1, WORK, "2025-03-10 08:00:00"),
        ev(2, BREAK, "2025-03-10 12:00:00"),
        ev(3, WORK, "2025-03-10 12:30:00"),
        ev(4, END, "2025-03-10 16:30:00"),
    ];
    let as_of = ts("2025-03-10 18:00:00");
    let tl = build_timeline(&events, &catalog(), as_of);

    for pair in tl.intervals.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }

    let last = tl.last().unwrap();
    assert!(last.open);
    assert_eq!(last.end, as_of);
    assert_eq!(last.duration_seconds, 90 * 60);

    // nothing lost, nothing counted twice
    assert_eq!(tl.total_seconds(), 10 * 3600);
    assert_eq!(tl.total_work_seconds, 8 * 3600);
    assert_eq!(
        tl.non_work_seconds_by_day().values().sum::<i64>(),
        30 * 60 + 90 * 60
    );
}

#[test]
fn test_unsorted_input_is_reordered() {
    let events = vec![
        ev(3, END, "2025-03-10 17:00:00"),
        ev(1, WORK, "2025-03-10 09:00:00"),
    ];
    let tl = build_timeline(&events, &catalog(), ts("2025-03-10 17:00:00"));

    assert_eq!(tl.intervals[0].event_id, 1);
    assert_eq!(tl.intervals[1].event_id, 3);
    assert_eq!(tl.total_work_seconds, 8 * 3600);
}

#[test]
fn test_double_scan_yields_one_zero_length_interval() {
    // same instant, insertion order decides
    let events = vec![
        ev(11, BREAK, "2025-03-10 10:00:00"),
        ev(10, WORK, "2025-03-10 10:00:00"),
        ev(12, END, "2025-03-10 11:00:00"),
    ];
    let tl = build_timeline(&events, &catalog(), ts("2025-03-10 11:00:00"));

    assert_eq!(tl.intervals.len(), 3);
    assert_eq!(tl.intervals[0].event_id, 10);
    assert_eq!(tl.intervals[0].duration_seconds, 0);
    assert_eq!(tl.intervals[1].event_id, 11);
    assert_eq!(tl.intervals[1].duration_seconds, 3600);

    let zero = tl.intervals.iter().filter(|i| i.duration_seconds == 0).count();
    // the open tail ends exactly at as_of, hence the second zero
    assert_eq!(zero, 2);
    assert_eq!(tl.total_work_seconds, 0);
}

#[test]
fn test_as_of_before_last_event_clamps_to_zero() {
    let events = vec![ev(1, WORK, "2025-03-10 09:00:00")];
    let tl = build_timeline(&events, &catalog(), ts("2025-03-10 08:00:00"));

    let only = tl.last().unwrap();
    assert!(only.open);
    assert_eq!(only.duration_seconds, 0);
    assert_eq!(tl.total_work_seconds, 0);
}

#[test]
fn test_orphaned_activity_is_unknown_non_work() {
    let events = vec![
        ev(1, 99, "2025-03-10 09:00:00"),
        ev(2, END, "2025-03-10 10:00:00"),
    ];
    let tl = build_timeline(&events, &catalog(), ts("2025-03-10 10:00:00"));

    assert_eq!(tl.intervals[0].activity, "unknown");
    assert!(!tl.intervals[0].counts_as_work);
    assert_eq!(tl.total_work_seconds, 0);
}

#[test]
fn test_interval_attributed_to_start_day() {
    let events = vec![
        ev(1, WORK, "2025-03-10 22:00:00"),
        ev(2, END, "2025-03-11 02:00:00"),
    ];
    let tl = build_timeline(&events, &catalog(), ts("2025-03-11 02:00:00"));
    let by_day = tl.work_seconds_by_day();

    assert_eq!(by_day.get(&ts("2025-03-10 00:00").date()), Some(&(4 * 3600)));
    assert_eq!(by_day.get(&ts("2025-03-11 00:00").date()), None);
}
