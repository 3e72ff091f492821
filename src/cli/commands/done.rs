use super::todo_line;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::mark_event_completed;
use crate::db::pool::Database;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::parse_optional_timestamp;

/// Mark an event as completed.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Done { id, at } = cmd {
        let at = parse_optional_timestamp(at.as_ref())?;

        let db = Database::new(cfg.database_path());
        let mut session = db.session()?;
        let ev = mark_event_completed(&mut session, *id, at)?;

        success(format!("Completed #{}", ev.id));
        println!("{}", todo_line(&ev));
    }

    Ok(())
}
