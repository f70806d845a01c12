//! Current status: the most recent event of a user and how long ago it happened.
//!
//! Derived from the last interval of the reconstructed timeline, never from a
//! separate "last event" lookup, so both views always agree.

use crate::core::calculator::timeline::{self, Timeline};
use crate::core::logic::Core;
use crate::db::{activities, queries, users};
use crate::errors::AppResult;
use crate::models::status::{CurrentStatus, UserStatus};
use chrono::NaiveDateTime;
use rusqlite::Connection;

pub fn status_from_timeline(tl: &Timeline) -> CurrentStatus {
    match tl.last() {
        None => CurrentStatus::Unknown,
        Some(last) => CurrentStatus::Known {
            activity_type_id: last.activity_type_id,
            activity: last.activity.clone(),
            counts_as_work: last.counts_as_work,
            at: last.start,
            since_seconds: last.duration_seconds,
        },
    }
}

/// Status of one user; `Unknown` when the user has no events (or does not exist).
pub fn current_status(
    conn: &Connection,
    user_id: i64,
    as_of: NaiveDateTime,
) -> AppResult<CurrentStatus> {
    let tl = Core::user_timeline(conn, user_id, as_of)?;
    Ok(status_from_timeline(&tl))
}

/// Live dashboard rows for every registered user, in user id order.
pub fn current_status_all(conn: &Connection, as_of: NaiveDateTime) -> AppResult<Vec<UserStatus>> {
    let catalog = activities::load_catalog(conn)?;
    let mut by_user = timeline::group_by_user(queries::load_all_events(conn)?);

    let mut out = Vec::new();
    for user in users::list_users(conn)? {
        let events = by_user.remove(&user.id).unwrap_or_default();
        let tl = timeline::build_timeline(&events, &catalog, as_of);
        out.push(UserStatus {
            user_id: user.id,
            user_name: user.name,
            status: status_from_timeline(&tl),
        });
    }
    Ok(out)
}
