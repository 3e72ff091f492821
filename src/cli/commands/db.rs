use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{applied_migrations, run_pending_migrations};
use crate::db::pool::{Database, Session};
use crate::db::stats;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        info,
    } = cmd
    {
        let db_path = cfg.database_path();
        let db = Database::new(db_path.as_str());

        // Single shared session, opened on first use
        let mut session: Option<Session> = None;

        fn get_session<'a>(
            session: &'a mut Option<Session>,
            db: &Database,
        ) -> AppResult<&'a mut Session> {
            if session.is_none() {
                *session = Some(db.session()?);
            }
            session
                .as_mut()
                .ok_or_else(|| AppError::Other("database session unavailable".into()))
        }

        //
        // 1) MIGRATE
        //
        if *migrate {
            let session = get_session(&mut session, &db)?;
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            // opening the session already applies pending migrations;
            // a second pass only confirms nothing is left
            let pending = run_pending_migrations(&session.conn)?;
            debug_assert!(pending.is_empty());
            for v in applied_migrations(&session.conn)? {
                println!("  {}", v);
            }
            println!("{}✔ Migration completed.{}\n", GREEN, RESET);
        }

        //
        // 2) INFO
        //
        if *info {
            let session = get_session(&mut session, &db)?;
            stats::print_db_info(session, &db_path)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            let session = get_session(&mut session, &db)?;

            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = session
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }
    }

    Ok(())
}
