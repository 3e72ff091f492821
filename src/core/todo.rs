use crate::db::pool::Session;
use crate::db::queries::load_actions;
use crate::errors::AppResult;
use crate::models::EventRead;
use crate::utils::date::{Window, in_window, week_bounds};
use serde::Serialize;

/// Pending todos partitioned by creation week.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodoSplit {
    pub created_this_week: Vec<EventRead>,
    pub older: Vec<EventRead>,
}

impl TodoSplit {
    pub fn is_empty(&self) -> bool {
        self.created_this_week.is_empty() && self.older.is_empty()
    }
}

/// Action events. With `pending_only`, only those that have a due date and
/// are not completed.
pub fn list_todo(session: &Session, pending_only: bool) -> AppResult<Vec<EventRead>> {
    load_actions(&session.conn, pending_only)
}

/// Split pending todos into those created during the current week and the rest.
pub fn split_todo_by_current_week(session: &Session) -> AppResult<TodoSplit> {
    let todos = list_todo(session, true)?;
    Ok(partition_by_window(todos, &week_bounds(None)?))
}

/// `events` must be pending todos. Order inside each bucket follows the
/// input order.
pub fn partition_by_window(events: Vec<EventRead>, window: &Window) -> TodoSplit {
    debug_assert!(events.iter().all(EventRead::is_pending_todo));

    let (created_this_week, older) = events
        .into_iter()
        .partition(|ev| in_window(&ev.created_at, window));

    TodoSplit {
        created_this_week,
        older,
    }
}
