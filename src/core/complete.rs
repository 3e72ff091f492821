use crate::db::log::ttlog;
use crate::db::pool::Session;
use crate::db::queries::{load_event, set_completed_at};
use crate::errors::{AppError, AppResult};
use crate::models::EventRead;
use crate::utils::time::{now_utc, to_db_instant};
use chrono::{DateTime, Utc};
use tracing::info;

/// Set `completed_at` (default: now) on an existing event.
///
/// Calling this again on a completed event overwrites the previous value.
/// A missing id fails with [`AppError::NotFound`] and writes nothing.
pub fn mark_event_completed(
    session: &mut Session,
    id: i64,
    completed_at: Option<DateTime<Utc>>,
) -> AppResult<EventRead> {
    let completed_at = completed_at.unwrap_or_else(now_utc);

    let tx = session.transaction()?;

    let existing = load_event(&tx, id)?.ok_or(AppError::NotFound(id))?;
    if let Some(previous) = existing.completed_at {
        info!(id, previous = %to_db_instant(&previous), "overwriting completion time");
    }

    set_completed_at(&tx, id, &completed_at)?;
    let ev = load_event(&tx, id)?.ok_or(AppError::NotFound(id))?;

    ttlog(
        &tx,
        "complete",
        &format!("#{}", id),
        &format!("completed at {}", to_db_instant(&completed_at)),
    )?;
    tx.commit()?;

    info!(id, "event completed");
    Ok(ev)
}
