use rpunchclock::core::logic::Core;
use rpunchclock::core::status::{current_status, current_status_all};
use rpunchclock::models::status::CurrentStatus;

mod common;
use common::{punch, seed, ts};

#[test]
fn test_user_without_events_is_unknown() {
    let s = seed();
    let status = current_status(&s.pool.conn, s.bob, ts("2025-03-10 12:00:00")).unwrap();
    assert_eq!(status, CurrentStatus::Unknown);
    assert_eq!(status.label(), "unknown");
}

#[test]
fn test_nonexistent_user_is_unknown_not_error() {
    let s = seed();
    let status = current_status(&s.pool.conn, 4242, ts("2025-03-10 12:00:00")).unwrap();
    assert_eq!(status, CurrentStatus::Unknown);
}

#[test]
fn test_status_matches_last_interval() {
    let mut s = seed();
    punch(&mut s.pool, s.bob, s.work, "2025-03-10 09:00:00");
    punch(&mut s.pool, s.bob, s.brk, "2025-03-10 12:00:00");

    let as_of = ts("2025-03-10 12:20:00");
    let status = current_status(&s.pool.conn, s.bob, as_of).unwrap();
    let tl = Core::user_timeline(&s.pool.conn, s.bob, as_of).unwrap();
    let last = tl.last().unwrap();

    match status {
        CurrentStatus::Known {
            activity_type_id,
            activity,
            counts_as_work,
            at,
            since_seconds,
        } => {
            assert_eq!(activity_type_id, s.brk);
            assert_eq!(activity, "Break");
            assert!(!counts_as_work);
            assert_eq!(at, last.start);
            assert_eq!(since_seconds, last.duration_seconds);
            assert_eq!(since_seconds, 20 * 60);
        }
        CurrentStatus::Unknown => panic!("expected a known status"),
    }
}

#[test]
fn test_double_scan_status_is_second_event() {
    let mut s = seed();
    punch(&mut s.pool, s.bob, s.work, "2025-03-10 09:00:00");
    punch(&mut s.pool, s.bob, s.brk, "2025-03-10 09:00:00");

    let status = current_status(&s.pool.conn, s.bob, ts("2025-03-10 09:30:00")).unwrap();
    assert_eq!(status.label(), "Break");
}

#[test]
fn test_status_for_all_users_in_id_order() {
    let mut s = seed();
    punch(&mut s.pool, s.alice, s.work, "2025-03-10 08:00:00");

    let rows = current_status_all(&s.pool.conn, ts("2025-03-10 10:00:00")).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].user_id, s.alice);
    assert_eq!(rows[0].status.label(), "Work");
    assert_eq!(rows[1].user_id, s.bob);
    assert_eq!(rows[1].status, CurrentStatus::Unknown);
}

#[test]
fn test_intervals_in_range_keep_real_successor() {
    let mut s = seed();
    punch(&mut s.pool, s.bob, s.work, "2025-03-10 22:00:00");
    punch(&mut s.pool, s.bob, s.end, "2025-03-11 01:00:00");

    let day = ts("2025-03-10 00:00").date();
    let ivs = Core::intervals_in_range(
        &s.pool.conn,
        s.bob,
        Some(day),
        Some(day),
        ts("2025-03-12 00:00:00"),
    )
    .unwrap();

    assert_eq!(ivs.len(), 1);
    assert_eq!(ivs[0].end, ts("2025-03-11 01:00:00"));
    assert_eq!(ivs[0].duration_seconds, 3 * 3600);
    assert!(!ivs[0].open);
}
