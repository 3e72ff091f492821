use crate::db::pool::Session;
use crate::db::queries::{load_event, load_events_between};
use crate::errors::AppResult;
use crate::models::EventRead;
use crate::utils::date::week_bounds;
use chrono::{DateTime, NaiveDate, Utc};

/// `None` when no event has this id.
pub fn get_event(session: &Session, id: i64) -> AppResult<Option<EventRead>> {
    load_event(&session.conn, id)
}

/// Events created in `[start, end)`, ordered by `(created_at, id)`.
pub fn list_events_between(
    session: &Session,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<Vec<EventRead>> {
    load_events_between(&session.conn, &start, &end)
}

/// Events created during the ISO week containing `anchor` (default: today, UTC).
pub fn list_week(session: &Session, anchor: Option<NaiveDate>) -> AppResult<Vec<EventRead>> {
    let (start, end) = week_bounds(anchor)?;
    list_events_between(session, start, end)
}
