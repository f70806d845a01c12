use crate::errors::{AppError, AppResult};
use crate::models::department::Department;
use rusqlite::{Connection, OptionalExtension, params};

pub fn list_departments(conn: &Connection) -> AppResult<Vec<Department>> {
    let mut stmt = conn.prepare("SELECT id, name FROM departments ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Department {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_department(conn: &Connection, id: i64) -> AppResult<Option<Department>> {
    let dept = conn
        .query_row("SELECT id, name FROM departments WHERE id = ?1", [id], |row| {
            Ok(Department {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .optional()?;
    Ok(dept)
}

pub fn insert_department(conn: &Connection, name: &str) -> AppResult<Department> {
    conn.execute("INSERT INTO departments (name) VALUES (?1)", [name])?;
    Ok(Department {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

pub fn rename_department(conn: &Connection, id: i64, name: &str) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE departments SET name = ?1 WHERE id = ?2",
        params![name, id],
    )?;
    if n == 0 {
        return Err(AppError::DepartmentNotFound(id));
    }
    Ok(())
}

/// Members are detached, not deleted.
pub fn delete_department(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE users SET department_id = NULL WHERE department_id = ?1",
        [id],
    )?;
    let n = conn.execute("DELETE FROM departments WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::DepartmentNotFound(id));
    }
    Ok(())
}
