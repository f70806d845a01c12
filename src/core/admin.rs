//! Administrative edits: users, departments, activity types and entry deletion.
//! Each operation is one transaction and leaves a line in the audit log.

use crate::db::pool::DbPool;
use crate::db::{activities, departments, log::ttlog, queries, users};
use crate::errors::{AppError, AppResult};
use crate::models::activity::ActivityType;
use crate::models::department::Department;
use crate::models::user::{NewUser, User};
use chrono::Local;
use log::info;
use rusqlite::Connection;

/// Partial update of an activity type; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ActivityChanges {
    pub status: Option<String>,
    pub counts_as_work: Option<bool>,
    pub comment: Option<String>,
}

/// Partial update of a user profile; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub stamp_key: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    /// `Some(None)` detaches the user from its department.
    pub department_id: Option<Option<i64>>,
}

pub struct AdminLogic;

/// 12-digit badge code derived from the clock, retried until unused.
fn generate_stamp_key(conn: &Connection) -> AppResult<String> {
    loop {
        let nanos = Local::now().timestamp_nanos_opt().unwrap_or_default();
        let key = (nanos.rem_euclid(900_000_000_000) + 100_000_000_000).to_string();
        if !users::stamp_key_exists(conn, &key)? {
            return Ok(key);
        }
    }
}

fn require_name(name: &str, what: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{} name must not be empty", what)));
    }
    Ok(())
}

fn require_department(conn: &Connection, id: Option<i64>) -> AppResult<()> {
    if let Some(id) = id
        && departments::get_department(conn, id)?.is_none()
    {
        return Err(AppError::DepartmentNotFound(id));
    }
    Ok(())
}

impl AdminLogic {
    // ------------------------------------------------
    // Users
    // ------------------------------------------------

    pub fn create_user(pool: &mut DbPool, new_user: &NewUser) -> AppResult<User> {
        require_name(&new_user.name, "user")?;

        pool.with_transaction(|tx| {
            require_department(tx, new_user.department_id)?;

            let stamp_key = match new_user.stamp_key.as_deref().map(str::trim) {
                Some(k) if !k.is_empty() => {
                    if users::stamp_key_exists(tx, k)? {
                        return Err(AppError::DuplicateStampKey(k.to_string()));
                    }
                    k.to_string()
                }
                _ => generate_stamp_key(tx)?,
            };

            let user = users::insert_user(tx, new_user, &stamp_key)?;
            ttlog(
                tx,
                "user_add",
                &user.id.to_string(),
                &format!("Created user '{}' (stamp key {})", user.name, user.stamp_key),
            )?;
            Ok(user)
        })
    }

    /// Edit name, badge, contact fields or department. Moving a user between
    /// departments moves all of its past hours in the department reports.
    pub fn update_user(pool: &mut DbPool, user_id: i64, changes: &UserChanges) -> AppResult<User> {
        if let Some(name) = &changes.name {
            require_name(name, "user")?;
        }

        pool.with_transaction(|tx| {
            let mut user = users::get_user(tx, user_id)?.ok_or(AppError::UserNotFound(user_id))?;

            if let Some(name) = &changes.name {
                user.name = name.trim().to_string();
            }
            if let Some(key) = &changes.stamp_key {
                let key = key.trim();
                if key.is_empty() {
                    return Err(AppError::InvalidInput("stamp key must not be empty".into()));
                }
                if users::user_id_for_stamp_key(tx, key)?.is_some_and(|owner| owner != user_id) {
                    return Err(AppError::DuplicateStampKey(key.to_string()));
                }
                user.stamp_key = key.to_string();
            }
            if let Some(email) = &changes.email {
                user.email = email.clone();
            }
            if let Some(position) = &changes.position {
                user.position = position.clone();
            }
            if let Some(dept) = changes.department_id {
                require_department(tx, dept)?;
                user.department_id = dept;
            }

            users::update_user(tx, &user)?;
            ttlog(
                tx,
                "user_edit",
                &user.id.to_string(),
                &format!(
                    "'{}' (stamp key {}, department {})",
                    user.name,
                    user.stamp_key,
                    user.department_id
                        .map_or_else(|| "none".to_string(), |d| d.to_string())
                ),
            )?;
            Ok(user)
        })
    }

    pub fn set_auto_checkout(pool: &mut DbPool, user_id: i64, enabled: bool) -> AppResult<()> {
        pool.with_transaction(|tx| {
            users::set_user_auto_checkout(tx, user_id, enabled)?;
            ttlog(
                tx,
                "user_auto_checkout",
                &user_id.to_string(),
                &format!("Midnight auto checkout {}", if enabled { "on" } else { "off" }),
            )
        })
    }

    /// Removes the user's events first, then the user.
    pub fn delete_user(pool: &mut DbPool, user_id: i64) -> AppResult<usize> {
        pool.with_transaction(|tx| {
            let removed = queries::delete_events_for_user(tx, user_id)?;
            users::delete_user(tx, user_id)?;
            ttlog(
                tx,
                "user_del",
                &user_id.to_string(),
                &format!("Deleted user and {} punch event(s)", removed),
            )?;
            Ok(removed)
        })
    }

    // ------------------------------------------------
    // Departments
    // ------------------------------------------------

    pub fn create_department(pool: &mut DbPool, name: &str) -> AppResult<Department> {
        require_name(name, "department")?;
        pool.with_transaction(|tx| {
            let dept = departments::insert_department(tx, name.trim())?;
            ttlog(tx, "department_add", &dept.id.to_string(), &dept.name)?;
            Ok(dept)
        })
    }

    pub fn rename_department(pool: &mut DbPool, id: i64, name: &str) -> AppResult<()> {
        require_name(name, "department")?;
        pool.with_transaction(|tx| {
            departments::rename_department(tx, id, name.trim())?;
            ttlog(tx, "department_rename", &id.to_string(), name.trim())
        })
    }

    pub fn delete_department(pool: &mut DbPool, id: i64) -> AppResult<()> {
        pool.with_transaction(|tx| {
            departments::delete_department(tx, id)?;
            ttlog(tx, "department_del", &id.to_string(), "Deleted department")
        })
    }

    // ------------------------------------------------
    // Activity types
    // ------------------------------------------------

    pub fn create_activity(
        pool: &mut DbPool,
        status: &str,
        counts_as_work: bool,
        comment: &str,
    ) -> AppResult<ActivityType> {
        if status.trim().is_empty() {
            return Err(AppError::InvalidInput("activity status must not be empty".into()));
        }
        pool.with_transaction(|tx| {
            let act = activities::insert_activity(tx, status.trim(), counts_as_work, comment)?;
            ttlog(
                tx,
                "activity_add",
                &act.id.to_string(),
                &format!("'{}' (work = {})", act.status, act.counts_as_work),
            )?;
            Ok(act)
        })
    }

    /// Changing the work flag reclassifies every past interval of this type
    /// from the next report on; events themselves are untouched.
    pub fn update_activity(
        pool: &mut DbPool,
        id: i64,
        changes: &ActivityChanges,
    ) -> AppResult<ActivityType> {
        pool.with_transaction(|tx| {
            let mut act = activities::get_activity(tx, id)?.ok_or(AppError::ActivityNotFound(id))?;

            if let Some(status) = &changes.status {
                act.status = status.trim().to_string();
            }
            if let Some(work) = changes.counts_as_work {
                act.counts_as_work = work;
            }
            if let Some(comment) = &changes.comment {
                act.comment = comment.clone();
            }

            activities::update_activity(tx, &act)?;
            ttlog(
                tx,
                "activity_edit",
                &id.to_string(),
                &format!("'{}' (work = {})", act.status, act.counts_as_work),
            )?;
            Ok(act)
        })
    }

    /// Refused while any punch event still references the type.
    pub fn delete_activity(pool: &mut DbPool, id: i64) -> AppResult<()> {
        pool.with_transaction(|tx| {
            let references = queries::count_events_for_activity(tx, id)?;
            if references > 0 {
                return Err(AppError::ActivityInUse { id, references });
            }
            activities::delete_activity(tx, id)?;
            ttlog(tx, "activity_del", &id.to_string(), "Deleted activity type")
        })
    }

    // ------------------------------------------------
    // Entries
    // ------------------------------------------------

    /// Administrative removal of a single punch event.
    pub fn delete_entry(pool: &mut DbPool, entry_id: i64) -> AppResult<()> {
        pool.with_transaction(|tx| {
            let ev = queries::get_event(tx, entry_id)?;
            queries::delete_event(tx, entry_id)?;

            let detail = ev.map_or_else(
                || "Deleted entry".to_string(),
                |ev| format!("Deleted entry of user {} at {}", ev.user_id, ev.timestamp_str()),
            );
            ttlog(tx, "entry_del", &entry_id.to_string(), &detail)?;
            info!("entry {} deleted", entry_id);
            Ok(())
        })
    }
}
