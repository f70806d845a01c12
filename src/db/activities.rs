use crate::errors::{AppError, AppResult};
use crate::models::activity::{ActivityCatalog, ActivityType};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<ActivityType> {
    Ok(ActivityType {
        id: row.get("id")?,
        status: row.get("status")?,
        counts_as_work: row.get::<_, i64>("work")? == 1,
        comment: row.get("comment")?,
    })
}

pub fn list_activities(conn: &Connection) -> AppResult<Vec<ActivityType>> {
    let mut stmt = conn.prepare("SELECT id, status, work, comment FROM activity_types ORDER BY id")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Fresh snapshot of the activity types; never reuse it across requests.
pub fn load_catalog(conn: &Connection) -> AppResult<ActivityCatalog> {
    Ok(ActivityCatalog::new(list_activities(conn)?))
}

pub fn get_activity(conn: &Connection, id: i64) -> AppResult<Option<ActivityType>> {
    let act = conn
        .query_row(
            "SELECT id, status, work, comment FROM activity_types WHERE id = ?1",
            [id],
            map_row,
        )
        .optional()?;
    Ok(act)
}

pub fn insert_activity(
    conn: &Connection,
    status: &str,
    counts_as_work: bool,
    comment: &str,
) -> AppResult<ActivityType> {
    conn.execute(
        "INSERT INTO activity_types (status, work, comment) VALUES (?1, ?2, ?3)",
        params![status, counts_as_work as i64, comment],
    )?;

    Ok(ActivityType {
        id: conn.last_insert_rowid(),
        status: status.to_string(),
        counts_as_work,
        comment: comment.to_string(),
    })
}

pub fn update_activity(conn: &Connection, act: &ActivityType) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE activity_types SET status = ?1, work = ?2, comment = ?3 WHERE id = ?4",
        params![act.status, act.counts_as_work as i64, act.comment, act.id],
    )?;
    if n == 0 {
        return Err(AppError::ActivityNotFound(act.id));
    }
    Ok(())
}

pub fn delete_activity(conn: &Connection, id: i64) -> AppResult<()> {
    let n = conn.execute("DELETE FROM activity_types WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::ActivityNotFound(id));
    }
    Ok(())
}
