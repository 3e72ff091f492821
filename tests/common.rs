#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Utc};
use poppy::db::pool::{Database, Session};
use poppy::db::queries::{insert_event, set_completed_at};
use poppy::models::EventDraft;
use tempfile::TempDir;

pub fn poppy() -> Command {
    cargo_bin_cmd!("poppy")
}

/// Fresh database in its own temp dir. Keep the `TempDir` alive for the
/// duration of the test.
pub fn fresh_db() -> (TempDir, Database) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("poppy.sqlite");
    let db = Database::new(path.to_string_lossy());
    (dir, db)
}

/// Path of a fresh database file for CLI tests.
pub fn setup_test_db() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("poppy.sqlite").to_string_lossy().to_string();
    (dir, path)
}

/// Insert a row with an explicit `created_at`, bypassing the storage default.
pub fn seed(
    session: &Session,
    draft: EventDraft,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
) -> i64 {
    let payload = draft.validate().expect("valid seed");
    let id = insert_event(&session.conn, &payload, Some(created_at)).expect("insert seed");
    if let Some(done) = completed_at {
        set_completed_at(&session.conn, id, &done).expect("complete seed");
    }
    id
}

pub fn count_rows(session: &Session) -> i64 {
    session
        .conn
        .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))
        .expect("count")
}
