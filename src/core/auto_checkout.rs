//! Midnight auto-checkout.
//!
//! Before a new punch is stored for a user who opted in, a forgotten work
//! interval that started on an earlier day is closed at 23:59:59 of that day
//! with a non-work event. Request-triggered only; there is no timer.

use crate::core::calculator::timeline::sort_events;
use crate::db::{log::ttlog, queries};
use crate::errors::AppResult;
use crate::models::activity::ActivityCatalog;
use crate::models::punch::{NewPunch, PunchEvent};
use crate::models::user::User;
use crate::utils::time::end_of_day;
use chrono::NaiveDateTime;
use log::{info, warn};
use rusqlite::Connection;

pub const DEFAULT_CHECKOUT_STATUS: &str = "Break";

pub const AUTO_CHECKOUT_COMMENT: &str = "auto checkout at midnight";

#[derive(Debug, Clone)]
pub struct CheckoutPolicy {
    /// Label of the non-work activity preferred for the synthetic event.
    pub preferred_status: String,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            preferred_status: DEFAULT_CHECKOUT_STATUS.to_string(),
        }
    }
}

/// What the inserter decided for one incoming punch.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutPlan {
    Disabled,
    NoHistory,
    LastNotWork,
    /// The last event is on the same day as (or later than) the new punch.
    NoBoundary,
    /// No non-work activity exists; the punch proceeds without a boundary.
    ConfigurationGap,
    Insert(NewPunch),
}

/// Pure decision for a user whose latest event is `last`.
pub fn plan_midnight_checkout(
    user: &User,
    last: Option<&PunchEvent>,
    catalog: &ActivityCatalog,
    new_ts: NaiveDateTime,
    policy: &CheckoutPolicy,
) -> CheckoutPlan {
    if !user.auto_checkout_midnight {
        return CheckoutPlan::Disabled;
    }

    let Some(last) = last else {
        return CheckoutPlan::NoHistory;
    };

    if !catalog.counts_as_work(last.activity_type_id) {
        return CheckoutPlan::LastNotWork;
    }

    // a back-dated punch never gets a boundary placed after it
    if new_ts.date() <= last.date() {
        return CheckoutPlan::NoBoundary;
    }

    match catalog.checkout_activity(&policy.preferred_status) {
        None => CheckoutPlan::ConfigurationGap,
        Some(act) => CheckoutPlan::Insert(NewPunch {
            user_id: user.id,
            activity_type_id: act.id,
            timestamp: end_of_day(last.date()),
            comment: Some(AUTO_CHECKOUT_COMMENT.to_string()),
        }),
    }
}

/// Apply the policy against the store. Must run in the same transaction as the
/// insert of the punch that triggered it.
///
/// Idempotent per day boundary: once the synthetic event exists it becomes the
/// user's latest event, which is non-work, so a second call inserts nothing.
pub fn ensure_midnight_checkout(
    conn: &Connection,
    user: &User,
    catalog: &ActivityCatalog,
    new_ts: NaiveDateTime,
    policy: &CheckoutPolicy,
) -> AppResult<Option<PunchEvent>> {
    if !user.auto_checkout_midnight {
        return Ok(None);
    }

    let mut history = queries::load_events_for_user(conn, user.id)?;
    sort_events(&mut history);

    match plan_midnight_checkout(user, history.last(), catalog, new_ts, policy) {
        CheckoutPlan::Insert(punch) => {
            let ev = queries::insert_event(conn, &punch)?;
            ttlog(
                conn,
                "auto_checkout",
                &user.id.to_string(),
                &format!(
                    "Synthetic '{}' at {} for user {}",
                    catalog.label(ev.activity_type_id),
                    ev.timestamp_str(),
                    user.name
                ),
            )?;
            info!(
                "auto checkout inserted for user {} at {}",
                user.id,
                ev.timestamp_str()
            );
            Ok(Some(ev))
        }
        CheckoutPlan::ConfigurationGap => {
            warn!(
                "auto checkout skipped for user {}: no non-work activity type configured",
                user.id
            );
            Ok(None)
        }
        _ => Ok(None),
    }
}
