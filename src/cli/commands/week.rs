use crate::config::Config;
use crate::core::list_week;
use crate::db::pool::Database;
use crate::errors::AppResult;
use crate::models::EventRead;
use crate::utils::time::format_minutes;

/// Show this week's events (UTC week).
pub fn handle(cfg: &Config) -> AppResult<()> {
    let events = {
        let db = Database::new(cfg.database_path());
        let session = db.session()?;
        list_week(&session, None)?
    };

    for ev in &events {
        println!("{}", week_line(ev));
    }
    Ok(())
}

fn week_line(ev: &EventRead) -> String {
    let ts = format_minutes(&ev.created_at);
    match &ev.why {
        Some(why) => format!("{}  [{}]  {} because {}", ts, ev.kind, ev.text, why),
        None => format!("{}  [{}]  {}", ts, ev.kind, ev.text),
    }
}
