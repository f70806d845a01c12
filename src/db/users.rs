use crate::errors::{AppError, AppResult};
use crate::models::user::{NewUser, User};
use rusqlite::{Connection, OptionalExtension, Row, params};

const USER_COLUMNS: &str =
    "id, name, stamp_key, email, position, department_id, auto_checkout_midnight";

fn map_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        stamp_key: row.get("stamp_key")?,
        email: row.get("email")?,
        position: row.get("position")?,
        department_id: row.get("department_id")?,
        auto_checkout_midnight: row.get::<_, i64>("auto_checkout_midnight")? == 1,
    })
}

pub fn list_users(conn: &Connection) -> AppResult<Vec<User>> {
    let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_user(conn: &Connection, id: i64) -> AppResult<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS);
    Ok(conn.query_row(&sql, [id], map_row).optional()?)
}

pub fn user_id_for_stamp_key(conn: &Connection, stamp_key: &str) -> AppResult<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM users WHERE stamp_key = ?1",
            [stamp_key.trim()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

pub fn stamp_key_exists(conn: &Connection, stamp_key: &str) -> AppResult<bool> {
    Ok(user_id_for_stamp_key(conn, stamp_key)?.is_some())
}

/// `stamp_key` must already be resolved and unique.
pub fn insert_user(conn: &Connection, user: &NewUser, stamp_key: &str) -> AppResult<User> {
    conn.execute(
        "INSERT INTO users (name, stamp_key, email, position, department_id, auto_checkout_midnight)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user.name,
            stamp_key,
            user.email,
            user.position,
            user.department_id,
            user.auto_checkout_midnight as i64,
        ],
    )?;

    Ok(User {
        id: conn.last_insert_rowid(),
        name: user.name.clone(),
        stamp_key: stamp_key.to_string(),
        email: user.email.clone(),
        position: user.position.clone(),
        department_id: user.department_id,
        auto_checkout_midnight: user.auto_checkout_midnight,
    })
}

/// Overwrite the editable profile fields of an existing user.
pub fn update_user(conn: &Connection, user: &User) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE users
            SET name = ?1, stamp_key = ?2, email = ?3, position = ?4, department_id = ?5
          WHERE id = ?6",
        params![
            user.name,
            user.stamp_key,
            user.email,
            user.position,
            user.department_id,
            user.id,
        ],
    )?;
    if n == 0 {
        return Err(AppError::UserNotFound(user.id));
    }
    Ok(())
}

pub fn set_user_auto_checkout(conn: &Connection, id: i64, enabled: bool) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE users SET auto_checkout_midnight = ?1 WHERE id = ?2",
        params![enabled as i64, id],
    )?;
    if n == 0 {
        return Err(AppError::UserNotFound(id));
    }
    Ok(())
}

pub fn delete_user(conn: &Connection, id: i64) -> AppResult<()> {
    let n = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::UserNotFound(id));
    }
    Ok(())
}
