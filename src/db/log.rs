use crate::errors::AppResult;
use crate::utils::time::{now_utc, to_db_timestamp};
use rusqlite::Connection;
use rusqlite::params;

/// One row of the internal `log` table.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Write an internal log line into the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = to_db_timestamp(&now_utc());

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// Most recent entries first.
pub fn load_log(conn: &Connection) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT date, operation, IFNULL(target, ''), message FROM log ORDER BY id DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(LogEntry {
            date: row.get(0)?,
            operation: row.get(1)?,
            target: row.get(2)?,
            message: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;

    #[test]
    fn newest_entry_comes_first() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        ttlog(&conn, "add", "#1", "first").unwrap();
        ttlog(&conn, "complete", "#1", "second").unwrap();

        let entries = load_log(&conn).unwrap();
        assert_eq!(entries[0].operation, "complete");
        assert_eq!(entries[1].message, "first");
        assert!(entries.iter().any(|e| e.operation == "migration_applied"));
    }
}
