use crate::db::log::ttlog;
use crate::db::pool::Session;
use crate::db::queries::{insert_event, load_event, set_completed_at};
use crate::errors::{AppError, AppResult};
use crate::models::{EventCreate, EventRead};
use crate::utils::time::to_db_instant;
use chrono::{DateTime, Utc};
use tracing::info;

/// Persist a validated event. `id` and `created_at` are assigned by storage;
/// every other field is copied from `payload`.
pub fn create_event(session: &mut Session, payload: &EventCreate) -> AppResult<EventRead> {
    insert_in_transaction(session, payload, None)
}

/// Persist a validated event that is already done. Insert and completion
/// commit together or not at all.
pub fn create_completed_event(
    session: &mut Session,
    payload: &EventCreate,
    completed_at: DateTime<Utc>,
) -> AppResult<EventRead> {
    insert_in_transaction(session, payload, Some(completed_at))
}

fn insert_in_transaction(
    session: &mut Session,
    payload: &EventCreate,
    completed_at: Option<DateTime<Utc>>,
) -> AppResult<EventRead> {
    let tx = session.transaction()?;

    let id = insert_event(&tx, payload, None)?;
    if let Some(at) = &completed_at {
        set_completed_at(&tx, id, at)?;
    }
    let ev = load_event(&tx, id)?.ok_or(AppError::NotFound(id))?;

    let mut message = format!("[{}] {}", ev.kind, ev.text);
    if let Some(at) = &completed_at {
        message.push_str(&format!(" (completed at {})", to_db_instant(at)));
    }
    ttlog(&tx, "add", &format!("#{}", ev.id), &message)?;
    tx.commit()?;

    info!(id = ev.id, kind = %ev.kind, completed = completed_at.is_some(), "event created");
    Ok(ev)
}
