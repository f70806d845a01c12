use crate::cli::commands::punch::report_receipt;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::punch::PunchLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::time::resolve_at;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Bulk {
        activity,
        users,
        as_of,
    } = cmd
    else {
        return Ok(());
    };

    let timestamp = resolve_at(as_of.at.as_ref())?;
    let mut pool = DbPool::new(&cfg.database)?;

    let batch = PunchLogic::record_batch(&mut pool, *activity, users, timestamp, &cfg.checkout_policy())?;

    for receipt in &batch.recorded {
        report_receipt(&pool, receipt)?;
    }

    if !batch.rejected.is_empty() {
        let ids: Vec<String> = batch.rejected.iter().map(i64::to_string).collect();
        messages::warning(format!("Unknown user id(s) skipped: {}", ids.join(", ")));
    }

    messages::info(format!(
        "{} punch(es) recorded, {} rejected",
        batch.recorded.len(),
        batch.rejected.len()
    ));
    Ok(())
}
