use crate::cli::commands::print_json;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::date::parse_optional_date;
use crate::utils::formatting::{hours, yes_no};
use crate::utils::table::Table;
use crate::utils::time::{format_elapsed, format_timestamp, resolve_at, seconds_to_hours};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Intervals {
        user,
        from,
        to,
        json,
        as_of,
    } = cmd
    else {
        return Ok(());
    };

    let as_of = resolve_at(as_of.at.as_ref())?;
    let from = parse_optional_date(from.as_ref())?;
    let to = parse_optional_date(to.as_ref())?;

    if let (Some(f), Some(t)) = (from, to)
        && t < f
    {
        return Err(AppError::InvalidDate(format!(
            "range end {} is before range start {}",
            t, f
        )));
    }

    let pool = DbPool::new(&cfg.database)?;
    let intervals = Core::intervals_in_range(&pool.conn, *user, from, to, as_of)?;

    if *json {
        return print_json(&intervals);
    }

    if intervals.is_empty() {
        messages::info(format!("No intervals for user {}", user));
        return Ok(());
    }

    let mut table = Table::new(&["Entry", "Activity", "Work", "Start", "End", "Duration", "Hours"])
        .with_separator(cfg.separator());
    let mut work_seconds = 0;

    for iv in &intervals {
        if iv.counts_as_work {
            work_seconds += iv.duration_seconds;
        }
        let end = if iv.open {
            format!("{} (open)", format_timestamp(&iv.end))
        } else {
            format_timestamp(&iv.end)
        };
        table.add_row(vec![
            iv.event_id.to_string(),
            iv.activity.clone(),
            yes_no(iv.counts_as_work).to_string(),
            format_timestamp(&iv.start),
            end,
            format_elapsed(iv.duration_seconds),
            hours(iv.duration_hours()),
        ]);
    }

    print!("{}", table.render());
    println!();
    messages::info(format!(
        "Work total: {} h ({})",
        hours(seconds_to_hours(work_seconds)),
        format_elapsed(work_seconds)
    ));
    Ok(())
}
