use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::punch::{PunchLogic, PunchReceipt};
use crate::db::activities;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::punch::NewPunch;
use crate::ui::messages;
use crate::utils::time::resolve_at;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Punch {
        user,
        stamp_key,
        activity,
        comment,
        as_of,
    } = cmd
    else {
        return Ok(());
    };

    let timestamp = resolve_at(as_of.at.as_ref())?;
    let policy = cfg.checkout_policy();
    let mut pool = DbPool::new(&cfg.database)?;

    let receipt = match (user, stamp_key) {
        (Some(user_id), _) => {
            let punch = NewPunch {
                user_id: *user_id,
                activity_type_id: *activity,
                timestamp,
                comment: comment.clone(),
            };
            PunchLogic::record(&mut pool, &punch, &policy)?
        }
        (None, Some(key)) => PunchLogic::record_by_stamp_key(
            &mut pool,
            key,
            *activity,
            timestamp,
            comment.clone(),
            &policy,
        )?,
        (None, None) => {
            return Err(AppError::InvalidInput(
                "either --user or --stamp-key is required".into(),
            ));
        }
    };

    report_receipt(&pool, &receipt)
}

pub(crate) fn report_receipt(pool: &DbPool, receipt: &PunchReceipt) -> AppResult<()> {
    let catalog = activities::load_catalog(&pool.conn)?;

    if let Some(syn) = &receipt.synthetic {
        messages::warning(format!(
            "Open work interval closed automatically: '{}' at {} (entry {})",
            catalog.label(syn.activity_type_id),
            syn.timestamp_str(),
            syn.id
        ));
    }

    let ev = &receipt.event;
    messages::punched(format!(
        "User {} -> '{}' at {} (entry {})",
        ev.user_id,
        catalog.label(ev.activity_type_id),
        ev.timestamp_str(),
        ev.id
    ));
    Ok(())
}
