use crate::db::migrate::applied_migrations;
use crate::db::pool::Session;
use crate::db::queries::{count_by_kind, count_events, created_range};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::format_minutes;
use std::fs;

pub fn print_db_info(session: &Session, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path)?.len();
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) SCHEMA VERSION
    //
    let versions = applied_migrations(&session.conn)?;
    let current = versions
        .last()
        .cloned()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!("{}• Schema:{} {}", CYAN, RESET, current);

    //
    // 3) TOTAL EVENTS
    //
    let count = count_events(&session.conn)?;
    println!(
        "{}• Total events:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );
    for (kind, n) in count_by_kind(&session.conn)? {
        println!("    {:<9} {}", kind.as_str(), n);
    }

    //
    // 4) CREATED RANGE
    //
    let (fmt_first, fmt_last) = match created_range(&session.conn)? {
        Some((first, last)) => (format_minutes(&first), format_minutes(&last)),
        None => (format!("{GREY}--{RESET}"), format!("{GREY}--{RESET}")),
    };

    println!("{}• Created range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
