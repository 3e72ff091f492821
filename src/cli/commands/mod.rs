pub mod add;
pub mod config;
pub mod db;
pub mod done;
pub mod init;
pub mod log;
pub mod serve;
pub mod todo;
pub mod week;

use crate::models::EventRead;
use crate::utils::time::format_minutes;

/// One-line rendering shared by `todo` and `done`.
pub(crate) fn todo_line(ev: &EventRead) -> String {
    let mut line = format!("#{}  {}  ", ev.id, format_minutes(&ev.created_at));
    if let Some(due) = &ev.due_at {
        line.push_str(&format!("due {}  ", format_minutes(due)));
    }
    line.push_str(&ev.text);
    if let Some(done) = &ev.completed_at {
        line.push_str(&format!("  (done {})", format_minutes(done)));
    }
    line
}
