use crate::core::auto_checkout::{CheckoutPolicy, ensure_midnight_checkout};
use crate::db::pool::DbPool;
use crate::db::{activities, log::ttlog, queries, users};
use crate::errors::{AppError, AppResult};
use crate::models::activity::ActivityCatalog;
use crate::models::punch::{NewPunch, PunchEvent};
use chrono::NaiveDateTime;
use log::{debug, warn};
use rusqlite::Connection;

/// Result of one accepted clock action.
#[derive(Debug, Clone)]
pub struct PunchReceipt {
    pub event: PunchEvent,
    /// Boundary event written just before `event`, if any.
    pub synthetic: Option<PunchEvent>,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReceipt {
    pub recorded: Vec<PunchReceipt>,
    /// User ids that do not exist; nothing was written for them.
    pub rejected: Vec<i64>,
}

/// High-level business logic for recording clock actions.
pub struct PunchLogic;

/// Auto-checkout, append and audit for one user. Runs inside the caller's transaction.
fn record_one(
    conn: &Connection,
    catalog: &ActivityCatalog,
    punch: &NewPunch,
    policy: &CheckoutPolicy,
) -> AppResult<PunchReceipt> {
    let user = users::get_user(conn, punch.user_id)?
        .ok_or(AppError::UserNotFound(punch.user_id))?;

    let synthetic = ensure_midnight_checkout(conn, &user, catalog, punch.timestamp, policy)?;
    let event = queries::insert_event(conn, punch)?;

    ttlog(
        conn,
        "punch",
        &user.id.to_string(),
        &format!(
            "{} -> '{}' at {}",
            user.name,
            catalog.label(event.activity_type_id),
            event.timestamp_str()
        ),
    )?;
    debug!("punch {} recorded for user {}", event.id, user.id);

    Ok(PunchReceipt { event, synthetic })
}

fn require_activity(catalog: &ActivityCatalog, activity_type_id: i64) -> AppResult<()> {
    if !catalog.contains(activity_type_id) {
        return Err(AppError::ActivityNotFound(activity_type_id));
    }
    Ok(())
}

impl PunchLogic {
    /// Record a single clock action.
    ///
    /// The synthetic boundary (if any) and the punch commit together; if the
    /// punch cannot be written neither is kept.
    pub fn record(
        pool: &mut DbPool,
        punch: &NewPunch,
        policy: &CheckoutPolicy,
    ) -> AppResult<PunchReceipt> {
        pool.with_transaction(|tx| {
            let catalog = activities::load_catalog(tx)?;
            require_activity(&catalog, punch.activity_type_id)?;
            record_one(tx, &catalog, punch, policy)
        })
    }

    /// Same as [`PunchLogic::record`], resolving the user from a badge code.
    pub fn record_by_stamp_key(
        pool: &mut DbPool,
        stamp_key: &str,
        activity_type_id: i64,
        timestamp: NaiveDateTime,
        comment: Option<String>,
        policy: &CheckoutPolicy,
    ) -> AppResult<PunchReceipt> {
        let user_id = users::user_id_for_stamp_key(&pool.conn, stamp_key)?
            .ok_or_else(|| AppError::UnknownStampKey(stamp_key.to_string()))?;

        let punch = NewPunch {
            user_id,
            activity_type_id,
            timestamp,
            comment,
        };
        Self::record(pool, &punch, policy)
    }

    /// Clock many users into one activity at one instant (barcode batch).
    ///
    /// One transaction for the whole batch. Unknown users are rejected one by
    /// one and reported back; an unknown activity rejects the batch.
    pub fn record_batch(
        pool: &mut DbPool,
        activity_type_id: i64,
        user_ids: &[i64],
        timestamp: NaiveDateTime,
        policy: &CheckoutPolicy,
    ) -> AppResult<BatchReceipt> {
        pool.with_transaction(|tx| {
            let catalog = activities::load_catalog(tx)?;
            require_activity(&catalog, activity_type_id)?;

            let mut receipt = BatchReceipt::default();
            for &user_id in user_ids {
                let punch = NewPunch {
                    user_id,
                    activity_type_id,
                    timestamp,
                    comment: None,
                };

                match record_one(tx, &catalog, &punch, policy) {
                    Ok(r) => receipt.recorded.push(r),
                    Err(AppError::UserNotFound(id)) => {
                        warn!("bulk punch: unknown user {}", id);
                        receipt.rejected.push(id);
                    }
                    Err(e) => return Err(e),
                }
            }
            Ok(receipt)
        })
    }
}
