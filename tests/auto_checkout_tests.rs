use rpunchclock::core::admin::AdminLogic;
use rpunchclock::core::auto_checkout::{
    AUTO_CHECKOUT_COMMENT, CheckoutPlan, CheckoutPolicy, ensure_midnight_checkout,
    plan_midnight_checkout,
};
use rpunchclock::core::logic::Core;
use rpunchclock::core::punch::PunchLogic;
use rpunchclock::db::pool::DbPool;
use rpunchclock::db::{activities, queries, users};
use rpunchclock::errors::AppError;
use rpunchclock::models::activity::{ActivityCatalog, ActivityType};
use rpunchclock::models::punch::{NewPunch, PunchEvent};
use rpunchclock::models::user::{NewUser, User};

mod common;
use common::{punch, seed, ts};

fn act(id: i64, status: &str, work: bool) -> ActivityType {
    ActivityType {
        id,
        status: status.into(),
        counts_as_work: work,
        comment: String::new(),
    }
}

fn user(auto: bool) -> User {
    User {
        id: 1,
        name: "Alice".into(),
        stamp_key: "1".into(),
        email: String::new(),
        position: String::new(),
        department_id: None,
        auto_checkout_midnight: auto,
    }
}

fn last(activity_type_id: i64, at: &str) -> PunchEvent {
    PunchEvent {
        id: 1,
        user_id: 1,
        activity_type_id,
        timestamp: ts(at),
        comment: None,
    }
}

#[test]
fn test_forgotten_checkout_closed_at_end_of_day() {
    let mut s = seed();
    punch(&mut s.pool, s.alice, s.work, "2025-03-10 09:00:00");
    let receipt = punch(&mut s.pool, s.alice, s.work, "2025-03-11 09:00:00");

    let syn = receipt.synthetic.expect("synthetic boundary");
    assert_eq!(syn.timestamp, ts("2025-03-10 23:59:59"));
    assert_eq!(syn.activity_type_id, s.brk);
    assert_eq!(syn.comment.as_deref(), Some(AUTO_CHECKOUT_COMMENT));
    assert!(syn.id < receipt.event.id);

    let tl = Core::user_timeline(&s.pool.conn, s.alice, ts("2025-03-11 10:00:00")).unwrap();
    let by_day = tl.work_seconds_by_day();
    assert_eq!(by_day.get(&ts("2025-03-10 00:00").date()), Some(&53_999));
    assert_eq!(by_day.get(&ts("2025-03-11 00:00").date()), Some(&3_600));

    let open = tl.last().unwrap();
    assert!(open.open);
    assert_eq!(open.start, ts("2025-03-11 09:00:00"));
}

#[test]
fn test_checkout_is_idempotent() {
    let mut s = seed();
    punch(&mut s.pool, s.alice, s.work, "2025-03-10 09:00:00");

    let u = users::get_user(&s.pool.conn, s.alice).unwrap().unwrap();
    let catalog = activities::load_catalog(&s.pool.conn).unwrap();
    let policy = CheckoutPolicy::default();
    let next_day = ts("2025-03-11 09:00:00");

    let first = ensure_midnight_checkout(&s.pool.conn, &u, &catalog, next_day, &policy).unwrap();
    assert!(first.is_some());

    // the synthetic event is now the latest one, and it is not work
    let second = ensure_midnight_checkout(&s.pool.conn, &u, &catalog, next_day, &policy).unwrap();
    assert!(second.is_none());

    let events = queries::load_events_for_user(&s.pool.conn, s.alice).unwrap();
    assert_eq!(events.len(), 2);
}

#[test]
fn test_disabled_user_gets_no_boundary() {
    let mut s = seed();
    punch(&mut s.pool, s.bob, s.work, "2025-03-10 09:00:00");
    let receipt = punch(&mut s.pool, s.bob, s.work, "2025-03-11 09:00:00");

    assert!(receipt.synthetic.is_none());
    let tl = Core::user_timeline(&s.pool.conn, s.bob, ts("2025-03-11 09:00:00")).unwrap();
    assert_eq!(tl.intervals[0].duration_seconds, 24 * 3600);
}

#[test]
fn test_same_day_punch_gets_no_boundary() {
    let mut s = seed();
    punch(&mut s.pool, s.alice, s.work, "2025-03-10 09:00:00");
    let receipt = punch(&mut s.pool, s.alice, s.brk, "2025-03-10 23:00:00");
    assert!(receipt.synthetic.is_none());
}

#[test]
fn test_last_event_not_work_gets_no_boundary() {
    let mut s = seed();
    punch(&mut s.pool, s.alice, s.work, "2025-03-10 09:00:00");
    punch(&mut s.pool, s.alice, s.end, "2025-03-10 17:00:00");
    let receipt = punch(&mut s.pool, s.alice, s.work, "2025-03-11 09:00:00");
    assert!(receipt.synthetic.is_none());
}

#[test]
fn test_backdated_punch_gets_no_boundary() {
    let mut s = seed();
    punch(&mut s.pool, s.alice, s.work, "2025-03-11 09:00:00");
    let receipt = punch(&mut s.pool, s.alice, s.brk, "2025-03-10 12:00:00");
    assert!(receipt.synthetic.is_none());
}

#[test]
fn test_plan_prefers_named_break_over_lower_id() {
    let catalog = ActivityCatalog::new(vec![
        act(1, "Work", true),
        act(2, "End of work", false),
        act(3, "Break", false),
    ]);
    let plan = plan_midnight_checkout(
        &user(true),
        Some(&last(1, "2025-03-10 09:00:00")),
        &catalog,
        ts("2025-03-11 09:00:00"),
        &CheckoutPolicy::default(),
    );

    match plan {
        CheckoutPlan::Insert(p) => {
            assert_eq!(p.activity_type_id, 3);
            assert_eq!(p.timestamp, ts("2025-03-10 23:59:59"));
        }
        other => panic!("unexpected plan {:?}", other),
    }
}

#[test]
fn test_plan_falls_back_to_lowest_non_work() {
    let catalog = ActivityCatalog::new(vec![
        act(1, "Work", true),
        act(4, "Lunch", false),
        act(2, "End of work", false),
    ]);
    let plan = plan_midnight_checkout(
        &user(true),
        Some(&last(1, "2025-03-10 09:00:00")),
        &catalog,
        ts("2025-03-12 09:00:00"),
        &CheckoutPolicy::default(),
    );
    assert!(matches!(plan, CheckoutPlan::Insert(NewPunch { activity_type_id: 2, .. })));
}

#[test]
fn test_plan_outcomes_without_boundary() {
    let catalog = ActivityCatalog::new(vec![act(1, "Work", true), act(2, "Break", false)]);
    let policy = CheckoutPolicy::default();
    let next_day = ts("2025-03-11 09:00:00");
    let work = last(1, "2025-03-10 09:00:00");

    assert_eq!(
        plan_midnight_checkout(&user(false), Some(&work), &catalog, next_day, &policy),
        CheckoutPlan::Disabled
    );
    assert_eq!(
        plan_midnight_checkout(&user(true), None, &catalog, next_day, &policy),
        CheckoutPlan::NoHistory
    );
    assert_eq!(
        plan_midnight_checkout(
            &user(true),
            Some(&last(2, "2025-03-10 09:00:00")),
            &catalog,
            next_day,
            &policy
        ),
        CheckoutPlan::LastNotWork
    );
    assert_eq!(
        plan_midnight_checkout(
            &user(true),
            Some(&work),
            &catalog,
            ts("2025-03-10 20:00:00"),
            &policy
        ),
        CheckoutPlan::NoBoundary
    );
}

#[test]
fn test_missing_non_work_type_lets_punch_through() {
    let mut pool = DbPool::in_memory().unwrap();
    let work = AdminLogic::create_activity(&mut pool, "Work", true, "").unwrap().id;
    let alice = AdminLogic::create_user(
        &mut pool,
        &NewUser {
            name: "Alice".into(),
            auto_checkout_midnight: true,
            ..NewUser::default()
        },
    )
    .unwrap()
    .id;

    let catalog = activities::load_catalog(&pool.conn).unwrap();
    let plan = plan_midnight_checkout(
        &users::get_user(&pool.conn, alice).unwrap().unwrap(),
        Some(&PunchEvent {
            id: 1,
            user_id: alice,
            activity_type_id: work,
            timestamp: ts("2025-03-10 09:00:00"),
            comment: None,
        }),
        &catalog,
        ts("2025-03-11 09:00:00"),
        &CheckoutPolicy::default(),
    );
    assert_eq!(plan, CheckoutPlan::ConfigurationGap);

    punch(&mut pool, alice, work, "2025-03-10 09:00:00");
    let receipt = punch(&mut pool, alice, work, "2025-03-11 09:00:00");
    assert!(receipt.synthetic.is_none());
    assert_eq!(queries::load_events_for_user(&pool.conn, alice).unwrap().len(), 2);
}

#[test]
fn test_failed_punch_leaves_no_boundary_behind() {
    let mut s = seed();
    punch(&mut s.pool, s.alice, s.work, "2025-03-10 09:00:00");

    let bad = NewPunch {
        user_id: s.alice,
        activity_type_id: 999,
        timestamp: ts("2025-03-11 09:00:00"),
        comment: None,
    };
    let err = PunchLogic::record(&mut s.pool, &bad, &CheckoutPolicy::default()).unwrap_err();
    assert!(matches!(err, AppError::ActivityNotFound(999)));

    let events = queries::load_events_for_user(&s.pool.conn, s.alice).unwrap();
    assert_eq!(events.len(), 1);
}
