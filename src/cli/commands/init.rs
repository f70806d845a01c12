use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use log::warn;

/// Handle the `init` command
///
/// Creates the config directory and file (skipped in test mode), opens the
/// store and applies all pending migrations.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    messages::info("Initializing rPunchClock…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", db_path);

    let pool = DbPool::new(&db_path)?;

    // audit line is best effort
    if let Err(e) = ttlog(
        &pool.conn,
        "init",
        "database",
        &format!("Database initialized at {}", db_path),
    ) {
        warn!("failed to write internal log: {}", e);
    }

    messages::success(format!("Database initialized at {}", db_path));
    Ok(())
}
