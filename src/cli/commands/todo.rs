use super::todo_line;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{list_todo, split_todo_by_current_week};
use crate::db::pool::Database;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Todo { all, split } = cmd {
        let db = Database::new(cfg.database_path());
        let session = db.session()?;

        if *split {
            let buckets = split_todo_by_current_week(&session)?;
            drop(session);

            if buckets.is_empty() {
                info("No pending todos.");
                return Ok(());
            }

            header("Created this week");
            for ev in &buckets.created_this_week {
                println!("{}", todo_line(ev));
            }
            header("Older");
            for ev in &buckets.older {
                println!("{}", todo_line(ev));
            }
            return Ok(());
        }

        let todos = list_todo(&session, !*all)?;
        drop(session);

        if todos.is_empty() {
            info(if *all { "No actions." } else { "No pending todos." });
            return Ok(());
        }

        for ev in &todos {
            println!("{}", todo_line(ev));
        }
    }

    Ok(())
}
