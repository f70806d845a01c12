use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::admin::AdminLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;

/// Handle `del <entry-id>`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { entry } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        AdminLogic::delete_entry(&mut pool, *entry)?;
        messages::success(format!("Entry {} deleted", entry));
    }
    Ok(())
}
