use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::core::admin::{AdminLogic, UserChanges};
use crate::db::pool::DbPool;
use crate::db::{departments, users};
use crate::errors::AppResult;
use crate::models::department::NO_DEPARTMENT;
use crate::models::user::NewUser;
use crate::ui::messages;
use crate::utils::formatting::yes_no;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        UserAction::Add {
            name,
            stamp_key,
            email,
            position,
            dept,
            auto_checkout,
        } => {
            let new_user = NewUser {
                name: name.trim().to_string(),
                stamp_key: stamp_key.clone(),
                email: email.clone(),
                position: position.clone(),
                department_id: *dept,
                auto_checkout_midnight: *auto_checkout,
            };
            let user = AdminLogic::create_user(&mut pool, &new_user)?;
            messages::success(format!(
                "User '{}' created with id {} (stamp key {})",
                user.name, user.id, user.stamp_key
            ));
        }
        UserAction::List => {
            let list = users::list_users(&pool.conn)?;
            if list.is_empty() {
                messages::info("No users registered");
                return Ok(());
            }
            let depts = departments::list_departments(&pool.conn)?;

            let mut table = Table::new(&[
                "ID",
                "Name",
                "Stamp key",
                "Department",
                "Position",
                "Email",
                "Auto checkout",
            ])
            .with_separator(cfg.separator());

            for u in list {
                let dept = u
                    .department_id
                    .and_then(|id| depts.iter().find(|d| d.id == id))
                    .map_or(NO_DEPARTMENT.to_string(), |d| d.name.clone());
                table.add_row(vec![
                    u.id.to_string(),
                    u.name,
                    u.stamp_key,
                    dept,
                    u.position,
                    u.email,
                    yes_no(u.auto_checkout_midnight).to_string(),
                ]);
            }
            print!("{}", table.render());
        }
        UserAction::Edit {
            id,
            name,
            stamp_key,
            email,
            position,
            dept,
            no_dept,
        } => {
            let department_id = match (dept, no_dept) {
                (Some(d), _) => Some(Some(*d)),
                (None, true) => Some(None),
                (None, false) => None,
            };
            let changes = UserChanges {
                name: name.clone(),
                stamp_key: stamp_key.clone(),
                email: email.clone(),
                position: position.clone(),
                department_id,
            };
            let user = AdminLogic::update_user(&mut pool, *id, &changes)?;
            messages::success(format!(
                "User {} updated: '{}' (stamp key {})",
                user.id, user.name, user.stamp_key
            ));
        }
        UserAction::AutoCheckout { id, on, off: _ } => {
            AdminLogic::set_auto_checkout(&mut pool, *id, *on)?;
            messages::success(format!(
                "Midnight auto checkout {} for user {}",
                if *on { "enabled" } else { "disabled" },
                id
            ));
        }
        UserAction::Del { id } => {
            let removed = AdminLogic::delete_user(&mut pool, *id)?;
            messages::success(format!(
                "User {} deleted together with {} punch event(s)",
                id, removed
            ));
        }
    }
    Ok(())
}
