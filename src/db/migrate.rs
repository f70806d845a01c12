use log::info;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists; it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c?.eq_ignore_ascii_case(column) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        rusqlite::params![chrono::Local::now().to_rfc3339(), version, message],
    )?;
    info!("migration applied: {} ({})", version, message);
    Ok(())
}

/// Departments, users, activity types and the punch event log.
fn create_core_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS departments (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS users (
            id                      INTEGER PRIMARY KEY AUTOINCREMENT,
            name                    TEXT NOT NULL,
            stamp_key               TEXT NOT NULL UNIQUE,
            email                   TEXT NOT NULL DEFAULT '',
            position                TEXT NOT NULL DEFAULT '',
            department_id           INTEGER NULL REFERENCES departments(id),
            auto_checkout_midnight  INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS activity_types (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            status   TEXT NOT NULL,
            work     INTEGER NOT NULL DEFAULT 0 CHECK (work IN (0, 1)),
            comment  TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS punch_events (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id           INTEGER NOT NULL,
            activity_type_id  INTEGER NOT NULL,
            ts                TEXT NOT NULL,          -- YYYY-MM-DD HH:MM:SS, local time
            comment           TEXT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_punch_events_user_ts ON punch_events(user_id, ts, id);
        CREATE INDEX IF NOT EXISTS idx_punch_events_activity ON punch_events(activity_type_id);
        "#,
    )?;
    Ok(())
}

/// Older stores were created before the per-user midnight auto-checkout preference.
fn migrate_add_auto_checkout_column(conn: &Connection) -> Result<()> {
    let version = "20250601_0002_add_auto_checkout_midnight";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !column_exists(conn, "users", "auto_checkout_midnight")? {
        conn.execute(
            "ALTER TABLE users ADD COLUMN auto_checkout_midnight INTEGER NOT NULL DEFAULT 0",
            [],
        )?;
    }

    mark_applied(conn, version, "users.auto_checkout_midnight present")
}

/// Stores created before user profiles had only `(id, name, stamp_key)` on `users`.
fn migrate_add_user_profile_columns(conn: &Connection) -> Result<()> {
    let version = "20250601_0003_add_user_profile_columns";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    let columns = [
        ("email", "TEXT NOT NULL DEFAULT ''"),
        ("position", "TEXT NOT NULL DEFAULT ''"),
        ("department_id", "INTEGER NULL"),
    ];

    for (column, decl) in columns {
        if !column_exists(conn, "users", column)? {
            conn.execute(
                &format!("ALTER TABLE users ADD COLUMN {} {}", column, decl),
                [],
            )?;
        }
    }

    mark_applied(conn, version, "users.email, users.position, users.department_id present")
}

/// Public entry point: run all pending migrations. Safe to call on every open.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    let fresh = !table_exists(conn, "punch_events")?;
    create_core_tables(conn)?;
    if fresh {
        info!("created punch clock schema");
    }

    migrate_add_auto_checkout_column(conn)?;
    migrate_add_user_profile_columns(conn)?;

    Ok(())
}
