use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{create_completed_event, create_event};
use crate::db::pool::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{EventDraft, Meta};
use crate::utils::time::parse_optional_timestamp;

/// Add an event.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        text,
        kind,
        why,
        tags,
        meta,
        due_at,
        completed_at,
    } = cmd
    {
        //
        // 1. Parse raw flags
        //
        let meta_obj = match meta {
            Some(raw) => serde_json::from_str::<Meta>(raw).map_err(|e| {
                AppError::Validation(format!("--meta must be a JSON object: {}", e))
            })?,
            None => Meta::new(),
        };
        let due = parse_optional_timestamp(due_at.as_ref())?;
        let completed = parse_optional_timestamp(completed_at.as_ref())?;

        //
        // 2. Validate (nothing touches the DB before this succeeds)
        //
        let mut draft = EventDraft::new(kind.as_str(), text.as_str())
            .source("cli")
            .tags(tags.iter().cloned())
            .meta(meta_obj);
        draft.why = why.clone();
        draft.due_at = due;
        let payload = draft.validate()?;

        //
        // 3. Persist
        //
        let db = Database::new(cfg.database_path());
        let mut session = db.session()?;
        let ev = match completed {
            Some(at) => create_completed_event(&mut session, &payload, at)?,
            None => create_event(&mut session, &payload)?,
        };

        println!("Saved #{} [{}] {}", ev.id, ev.kind, ev.text);
    }

    Ok(())
}
