//! Event log access: ordered reads per user and appends.

use crate::errors::{AppError, AppResult};
use crate::models::punch::{NewPunch, PunchEvent};
use crate::utils::time::{format_timestamp, parse_timestamp};
use log::warn;
use rusqlite::{Connection, OptionalExtension, Row, params};

/// Canonical event order. The in-memory reconstructor sorts by the same key.
pub const EVENT_ORDER: &str = "ts ASC, id ASC";

const EVENT_COLUMNS: &str = "id, user_id, activity_type_id, ts, comment";

struct RawEvent {
    id: i64,
    user_id: i64,
    activity_type_id: i64,
    ts: String,
    comment: Option<String>,
}

fn map_raw(row: &Row) -> rusqlite::Result<RawEvent> {
    Ok(RawEvent {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        activity_type_id: row.get("activity_type_id")?,
        ts: row.get("ts")?,
        comment: row.get("comment")?,
    })
}

/// Rows whose timestamp cannot be parsed are dropped: reports must survive dirty history.
fn into_event(raw: RawEvent) -> Option<PunchEvent> {
    match parse_timestamp(&raw.ts) {
        Some(timestamp) => Some(PunchEvent {
            id: raw.id,
            user_id: raw.user_id,
            activity_type_id: raw.activity_type_id,
            timestamp,
            comment: raw.comment,
        }),
        None => {
            warn!(
                "skipping punch event {} of user {}: unparseable timestamp '{}'",
                raw.id, raw.user_id, raw.ts
            );
            None
        }
    }
}

fn collect_events<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> AppResult<Vec<PunchEvent>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, map_raw)?;

    let mut out = Vec::new();
    for r in rows {
        if let Some(ev) = into_event(r?) {
            out.push(ev);
        }
    }
    Ok(out)
}

/// Full history of one user, in canonical order.
pub fn load_events_for_user(conn: &Connection, user_id: i64) -> AppResult<Vec<PunchEvent>> {
    let sql = format!(
        "SELECT {} FROM punch_events WHERE user_id = ?1 ORDER BY {}",
        EVENT_COLUMNS, EVENT_ORDER
    );
    collect_events(conn, &sql, [user_id])
}

/// Full history of every user, grouped by user and in canonical order inside each group.
pub fn load_all_events(conn: &Connection) -> AppResult<Vec<PunchEvent>> {
    let sql = format!(
        "SELECT {} FROM punch_events ORDER BY user_id ASC, {}",
        EVENT_COLUMNS, EVENT_ORDER
    );
    collect_events(conn, &sql, [])
}

pub fn get_event(conn: &Connection, id: i64) -> AppResult<Option<PunchEvent>> {
    let sql = format!("SELECT {} FROM punch_events WHERE id = ?1", EVENT_COLUMNS);
    let raw = conn.query_row(&sql, [id], map_raw).optional()?;
    Ok(raw.and_then(into_event))
}

/// Append one event and return it with its surrogate id.
pub fn insert_event(conn: &Connection, ev: &NewPunch) -> AppResult<PunchEvent> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO punch_events (user_id, activity_type_id, ts, comment)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(params![
        ev.user_id,
        ev.activity_type_id,
        format_timestamp(&ev.timestamp),
        ev.comment,
    ])?;

    Ok(PunchEvent {
        id: conn.last_insert_rowid(),
        user_id: ev.user_id,
        activity_type_id: ev.activity_type_id,
        timestamp: ev.timestamp,
        comment: ev.comment.clone(),
    })
}

pub fn delete_event(conn: &Connection, id: i64) -> AppResult<()> {
    let n = conn.execute("DELETE FROM punch_events WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::EntryNotFound(id));
    }
    Ok(())
}

pub fn count_events_for_activity(conn: &Connection, activity_type_id: i64) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM punch_events WHERE activity_type_id = ?1",
        [activity_type_id],
        |row| row.get(0),
    )?;
    Ok(n)
}

pub fn delete_events_for_user(conn: &Connection, user_id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM punch_events WHERE user_id = ?1", [user_id])?)
}
