use crate::errors::{AppError, AppResult};
use crate::models::{EventCreate, EventKind, EventRead, Meta};
use crate::utils::time::{ceil_to_millis, from_db_timestamp, to_db_instant, to_db_timestamp};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_EVENTS: &str = "SELECT id, created_at, kind, text, why, source, tags, meta, due_at, completed_at
     FROM events";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn timestamp_column(row: &Row, idx: usize) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| {
        from_db_timestamp(&s).ok_or_else(|| conversion_error(idx, AppError::InvalidDate(s.clone())))
    })
    .transpose()
}

pub fn map_row(row: &Row) -> Result<EventRead> {
    let created_at = timestamp_column(row, 1)?
        .ok_or_else(|| conversion_error(1, AppError::InvalidDate("NULL created_at".into())))?;

    let kind_str: String = row.get(2)?;
    let kind = EventKind::from_db_str(&kind_str).ok_or_else(|| {
        conversion_error(
            2,
            AppError::Validation(format!("Invalid kind: {}", kind_str)),
        )
    })?;

    let tags_json: String = row.get(6)?;
    let tags: Vec<String> =
        serde_json::from_str(&tags_json).map_err(|e| conversion_error(6, AppError::Json(e)))?;

    let meta_json: String = row.get(7)?;
    let meta: Meta =
        serde_json::from_str(&meta_json).map_err(|e| conversion_error(7, AppError::Json(e)))?;

    Ok(EventRead {
        id: row.get(0)?,
        created_at,
        kind,
        text: row.get(3)?,
        why: row.get(4)?,
        source: row.get(5)?,
        tags,
        meta,
        due_at: timestamp_column(row, 8)?,
        completed_at: timestamp_column(row, 9)?,
    })
}

fn collect(stmt: &mut rusqlite::Statement<'_>, params: impl rusqlite::Params) -> AppResult<Vec<EventRead>> {
    let rows = stmt.query_map(params, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert a validated event and return its id.
///
/// `created_at` is normally `None` so the column default assigns it;
/// passing a value is meant for imports and fixtures.
pub fn insert_event(
    conn: &Connection,
    ev: &EventCreate,
    created_at: Option<DateTime<Utc>>,
) -> AppResult<i64> {
    let tags = serde_json::to_string(ev.tags())?;
    let meta = serde_json::to_string(ev.meta())?;
    let due_at = ev.due_at().map(|d| to_db_instant(&d));

    match created_at {
        None => {
            conn.execute(
                "INSERT INTO events (kind, text, why, source, tags, meta, due_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    ev.kind().to_db_str(),
                    ev.text(),
                    ev.why(),
                    ev.source(),
                    tags,
                    meta,
                    due_at,
                ],
            )?;
        }
        Some(ts) => {
            conn.execute(
                "INSERT INTO events (created_at, kind, text, why, source, tags, meta, due_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    to_db_timestamp(&ts),
                    ev.kind().to_db_str(),
                    ev.text(),
                    ev.why(),
                    ev.source(),
                    tags,
                    meta,
                    due_at,
                ],
            )?;
        }
    }

    Ok(conn.last_insert_rowid())
}

pub fn load_event(conn: &Connection, id: i64) -> AppResult<Option<EventRead>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_EVENTS} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// Events with `start <= created_at < end`, ordered by `(created_at, id)`.
pub fn load_events_between(
    conn: &Connection,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
) -> AppResult<Vec<EventRead>> {
    // stored values have millisecond precision, so rounding both bounds up
    // keeps the comparison exact
    let start = to_db_timestamp(&ceil_to_millis(*start));
    let end = to_db_timestamp(&ceil_to_millis(*end));

    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_EVENTS}
         WHERE created_at >= ?1 AND created_at < ?2
         ORDER BY created_at ASC, id ASC"
    ))?;
    collect(&mut stmt, params![start, end])
}

/// Action events, optionally restricted to those with a due date and no
/// completion, ordered by `(created_at, id)`.
pub fn load_actions(conn: &Connection, pending_only: bool) -> AppResult<Vec<EventRead>> {
    let filter = if pending_only {
        " AND due_at IS NOT NULL AND completed_at IS NULL"
    } else {
        ""
    };

    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_EVENTS}
         WHERE kind = ?1{filter}
         ORDER BY created_at ASC, id ASC"
    ))?;
    collect(&mut stmt, [EventKind::Action.to_db_str()])
}

/// Returns the number of rows touched (0 when the id does not exist).
pub fn set_completed_at(conn: &Connection, id: i64, completed_at: &DateTime<Utc>) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE events SET completed_at = ?1 WHERE id = ?2",
        params![to_db_instant(completed_at), id],
    )?;
    Ok(n)
}

pub fn count_events(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?)
}

/// Event count per kind, in kind order; kinds with no rows are omitted.
pub fn count_by_kind(conn: &Connection) -> AppResult<Vec<(EventKind, i64)>> {
    let mut stmt = conn.prepare("SELECT kind, COUNT(*) FROM events GROUP BY kind")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;

    let mut out = Vec::new();
    for r in rows {
        let (kind, n) = r?;
        if let Some(k) = EventKind::from_db_str(&kind) {
            out.push((k, n));
        }
    }
    out.sort_by_key(|(k, _)| EventKind::ALL.iter().position(|x| x == k));
    Ok(out)
}

/// Earliest and latest `created_at`, if any event exists.
pub fn created_range(conn: &Connection) -> AppResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
    let (first, last): (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(created_at), MAX(created_at) FROM events",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    match (first, last) {
        (Some(f), Some(l)) => {
            let f = from_db_timestamp(&f).ok_or(AppError::InvalidDate(f))?;
            let l = from_db_timestamp(&l).ok_or(AppError::InvalidDate(l))?;
            Ok(Some((f, l)))
        }
        _ => Ok(None),
    }
}
