use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::Database;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::colors::{GREY, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd {
        if !*print {
            info("Use --print to show the internal log.");
            return Ok(());
        }

        let session = Database::new(cfg.database_path()).session()?;
        for entry in load_log(&session.conn)? {
            println!(
                "{}{}{}  {:<18} {:<24} {}",
                GREY, entry.date, RESET, entry.operation, entry.target, entry.message
            );
        }
    }

    Ok(())
}
