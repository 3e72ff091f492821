//! Database handle and scoped sessions.
//!
//! A [`Database`] only knows where the data lives; it is built once per
//! process from the configuration and passed by reference to whatever needs
//! storage. Each unit of work opens a [`Session`], which owns one SQLite
//! connection and closes it when dropped, on every exit path.

use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::{Connection, Transaction};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Open a session. Pending schema migrations are applied first.
    pub fn session(&self) -> AppResult<Session> {
        let conn = Connection::open(Path::new(&self.path))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        run_pending_migrations(&conn)?;
        debug!(db = %self.path, "session opened");
        Ok(Session {
            conn,
            path: self.path.clone(),
        })
    }
}

pub struct Session {
    pub conn: Connection,
    path: String,
}

impl Session {
    /// Begin a transaction. It rolls back on drop unless committed.
    pub fn transaction(&mut self) -> AppResult<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!(db = %self.path, "session released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn session_creates_schema() {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("t.sqlite").to_string_lossy());
        let session = db.session().unwrap();
        let n: i64 = session
            .conn
            .query_row("SELECT COUNT(*) FROM events", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn uncommitted_transaction_rolls_back() {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("t.sqlite").to_string_lossy());
        let mut session = db.session().unwrap();
        {
            let tx = session.transaction().unwrap();
            tx.execute("INSERT INTO events (kind, text) VALUES ('note', 'x')", [])
                .unwrap();
        }
        let n: i64 = session
            .conn
            .query_row("SELECT COUNT(*) FROM events", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 0);
    }
}
