use crate::cli::commands::print_json;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::status::{current_status, current_status_all};
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::AppResult;
use crate::models::status::{CurrentStatus, UserStatus};
use crate::ui::messages;
use crate::utils::formatting::{colorize_status, describe_since};
use crate::utils::table::Table;
use crate::utils::time::{format_timestamp, resolve_at};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Status { user, json, as_of } = cmd else {
        return Ok(());
    };

    let as_of = resolve_at(as_of.at.as_ref())?;
    let pool = DbPool::new(&cfg.database)?;

    let rows: Vec<UserStatus> = match user {
        Some(id) => {
            let name = users::get_user(&pool.conn, *id)?
                .map(|u| u.name)
                .unwrap_or_default();
            vec![UserStatus {
                user_id: *id,
                user_name: name,
                status: current_status(&pool.conn, *id, as_of)?,
            }]
        }
        None => current_status_all(&pool.conn, as_of)?,
    };

    if *json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        messages::info("No users registered");
        return Ok(());
    }

    messages::header(format!("Status at {}", format_timestamp(&as_of)));

    let mut table =
        Table::new(&["ID", "User", "Status", "Since", "For"]).with_separator(cfg.separator());
    for row in &rows {
        let since = match &row.status {
            CurrentStatus::Known { at, .. } => format_timestamp(at),
            CurrentStatus::Unknown => "--".to_string(),
        };
        table.add_row(vec![
            row.user_id.to_string(),
            row.user_name.clone(),
            colorize_status(&row.status),
            since,
            describe_since(&row.status),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}
