use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, Result};
use tracing::info;

struct Migration {
    version: &'static str,
    message: &'static str,
    sql: &'static str,
}

/// Ordered schema history. Applied versions are recorded in the `log` table.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250901_0001_create_events",
        message: "Created events table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS events (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            kind        TEXT NOT NULL CHECK(kind IN ('action','decision','idea','paper','note','meeting')
                                            AND length(kind) <= 32),
            text        TEXT NOT NULL CHECK(length(text) > 0),
            why         TEXT,
            source      TEXT CHECK(source IS NULL OR length(source) <= 64),
            tags        TEXT NOT NULL DEFAULT '[]',
            meta        TEXT NOT NULL DEFAULT '{}'
        );

        CREATE INDEX IF NOT EXISTS idx_events_kind ON events(kind);
        CREATE INDEX IF NOT EXISTS idx_events_source ON events(source);
        CREATE INDEX IF NOT EXISTS idx_events_created_at ON events(created_at, id);
        "#,
    },
    Migration {
        version: "20251006_0002_add_due_and_completed",
        message: "Added due_at and completed_at to events",
        sql: r#"
        ALTER TABLE events ADD COLUMN due_at TEXT;
        ALTER TABLE events ADD COLUMN completed_at TEXT;
        "#,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already applied, oldest first.
pub fn applied_migrations(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations. Returns the versions
/// applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(m.sql)
            .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'), 'migration_applied', ?1, ?2)",
            [m.version, m.message],
        )?;
        tx.commit()?;

        info!(version = m.version, "migration applied: {}", m.message);
        applied.push(m.version);
    }

    Ok(applied)
}
