use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::table::Table;

const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";

fn color_for_operation(op: &str) -> &'static str {
    match op {
        "punch" | "init" => GREEN,
        "auto_checkout" => YELLOW,
        other if other.ends_with("_del") => RED,
        other if other.ends_with("_add") => GREEN,
        other if other.ends_with("_edit") || other.ends_with("_rename") => YELLOW,
        _ => BLUE,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Log { print: true }) {
        messages::info("Nothing to do: use --print");
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database)?;
    let rows = load_log(&pool.conn)?;
    if rows.is_empty() {
        messages::info("The internal log is empty");
        return Ok(());
    }

    let mut table =
        Table::new(&["Date", "Operation", "Target", "Message"]).with_separator(cfg.separator());
    for r in rows {
        let op = format!("{}{}{}", color_for_operation(&r.operation), r.operation, RESET);
        table.add_row(vec![r.date, op, r.target, r.message]);
    }
    print!("{}", table.render());
    Ok(())
}
