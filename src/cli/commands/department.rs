use crate::cli::parser::{Commands, DepartmentAction};
use crate::config::Config;
use crate::core::admin::AdminLogic;
use crate::db::departments;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Department { action } = cmd else {
        return Ok(());
    };
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        DepartmentAction::Add { name } => {
            let dept = AdminLogic::create_department(&mut pool, name)?;
            messages::success(format!("Department '{}' created with id {}", dept.name, dept.id));
        }
        DepartmentAction::List => {
            let list = departments::list_departments(&pool.conn)?;
            if list.is_empty() {
                messages::info("No departments defined");
                return Ok(());
            }
            let mut table = Table::new(&["ID", "Name"]).with_separator(cfg.separator());
            for d in list {
                table.add_row(vec![d.id.to_string(), d.name]);
            }
            print!("{}", table.render());
        }
        DepartmentAction::Rename { id, name } => {
            AdminLogic::rename_department(&mut pool, *id, name)?;
            messages::success(format!("Department {} renamed to '{}'", id, name.trim()));
        }
        DepartmentAction::Del { id } => {
            AdminLogic::delete_department(&mut pool, *id)?;
            messages::success(format!("Department {} deleted", id));
        }
    }
    Ok(())
}
