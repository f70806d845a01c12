use crate::cli::parser::{ActivityAction, Commands};
use crate::config::Config;
use crate::core::admin::{ActivityChanges, AdminLogic};
use crate::db::activities;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::formatting::yes_no;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Activity { action } = cmd else {
        return Ok(());
    };
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        ActivityAction::Add {
            status,
            work,
            no_work,
            comment,
        } => {
            // without a flag a new type counts as work
            let counts_as_work = *work || !*no_work;
            let act = AdminLogic::create_activity(&mut pool, status, counts_as_work, comment)?;
            messages::success(format!(
                "Activity '{}' created with id {} (work: {})",
                act.status,
                act.id,
                yes_no(act.counts_as_work)
            ));
        }
        ActivityAction::List => {
            let list = activities::list_activities(&pool.conn)?;
            if list.is_empty() {
                messages::warning("No activity types defined");
                return Ok(());
            }
            let mut table =
                Table::new(&["ID", "Status", "Work", "Comment"]).with_separator(cfg.separator());
            for a in list {
                table.add_row(vec![
                    a.id.to_string(),
                    a.status,
                    yes_no(a.counts_as_work).to_string(),
                    a.comment,
                ]);
            }
            print!("{}", table.render());
        }
        ActivityAction::Edit {
            id,
            status,
            work,
            comment,
        } => {
            let changes = ActivityChanges {
                status: status.clone(),
                counts_as_work: *work,
                comment: comment.clone(),
            };
            let act = AdminLogic::update_activity(&mut pool, *id, &changes)?;
            messages::success(format!(
                "Activity {} updated: '{}' (work: {})",
                act.id,
                act.status,
                yes_no(act.counts_as_work)
            ));
        }
        ActivityAction::Del { id } => {
            AdminLogic::delete_activity(&mut pool, *id)?;
            messages::success(format!("Activity {} deleted", id));
        }
    }
    Ok(())
}
