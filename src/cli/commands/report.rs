use crate::cli::commands::print_json;
use crate::cli::parser::{Commands, ReportKind};
use crate::config::Config;
use crate::core::aggregate::ReportData;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::date::{parse_optional_date, resolve_range};
use crate::utils::formatting::hours;
use crate::utils::table::Table;
use crate::utils::time::resolve_at;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report { kind } = cmd else {
        return Ok(());
    };

    match kind {
        ReportKind::Daily {
            user,
            from,
            to,
            json,
            as_of,
        } => {
            let as_of = resolve_at(as_of.at.as_ref())?;
            let (from, to) = resolve_range(from.as_ref(), to.as_ref(), as_of.date())?;
            let data = load(cfg, as_of)?;
            let rows = data.daily_work_hours(*user, from, to);

            if *json {
                return print_json(&rows);
            }
            if rows.is_empty() {
                messages::info("No users to report");
                return Ok(());
            }

            messages::header(format!("Work hours {} .. {}", from, to));
            let mut table =
                Table::new(&["Date", "ID", "User", "Hours"]).with_separator(cfg.separator());
            for r in rows {
                table.add_row(vec![
                    r.date.to_string(),
                    r.user_id.to_string(),
                    r.user_name,
                    hours(r.work_hours),
                ]);
            }
            print!("{}", table.render());
        }

        ReportKind::Departments { day, json, as_of } => {
            let as_of = resolve_at(as_of.at.as_ref())?;
            let day = parse_optional_date(day.as_ref())?;
            let rows = load(cfg, as_of)?.department_summary(day);

            if *json {
                return print_json(&rows);
            }
            if rows.is_empty() {
                messages::info("No departments defined");
                return Ok(());
            }

            let title = day.map_or("Departments, all time".to_string(), |d| {
                format!("Departments on {}", d)
            });
            messages::header(title);
            let mut table = Table::new(&["Department", "Users", "Hours", "Avg h/user"])
                .with_separator(cfg.separator());
            for r in rows {
                table.add_row(vec![
                    r.department_name,
                    r.total_users.to_string(),
                    hours(r.total_hours),
                    hours(r.avg_hours_per_user),
                ]);
            }
            print!("{}", table.render());
        }

        ReportKind::Trend {
            days,
            today,
            json,
            as_of,
        } => {
            let as_of = resolve_at(as_of.at.as_ref())?;
            let today = parse_optional_date(today.as_ref())?.unwrap_or(as_of.date());
            let days = days.unwrap_or(cfg.trend_days);
            let rows = load(cfg, as_of)?.trend(today, days)?;

            if *json {
                return print_json(&rows);
            }

            messages::header(format!("Trend over the last {} day(s)", days));
            let mut table = Table::new(&["Date", "Hours", "Active users", "Work", "Non-work"])
                .with_separator(cfg.separator());
            for r in rows {
                table.add_row(vec![
                    r.date.to_string(),
                    hours(r.total_hours),
                    r.active_users.to_string(),
                    r.work_entries.to_string(),
                    r.non_work_entries.to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        ReportKind::Users {
            dept,
            day,
            json,
            as_of,
        } => {
            let as_of = resolve_at(as_of.at.as_ref())?;
            let day = parse_optional_date(day.as_ref())?;
            let rows = load(cfg, as_of)?.user_activity_summary(dept.as_deref(), day);

            if *json {
                return print_json(&rows);
            }
            if rows.is_empty() {
                messages::info("No users to report");
                return Ok(());
            }

            let mut table = Table::new(&[
                "ID",
                "User",
                "Department",
                "Work h",
                "Non-work h",
                "Last activity",
                "Status",
            ])
            .with_separator(cfg.separator());
            for r in rows {
                table.add_row(vec![
                    r.user_id.to_string(),
                    r.user_name,
                    r.department,
                    hours(r.work_hours),
                    hours(r.non_work_hours),
                    r.last_activity.unwrap_or_else(|| "--".to_string()),
                    r.status,
                ]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}

fn load(cfg: &Config, as_of: chrono::NaiveDateTime) -> AppResult<ReportData> {
    let pool = DbPool::new(&cfg.database)?;
    ReportData::load(&pool.conn, as_of)
}
