//! Event operations. Every function takes the session it works in; writes
//! run inside a single transaction.

pub mod add;
pub mod complete;
pub mod list;
pub mod todo;

pub use add::{create_completed_event, create_event};
pub use complete::mark_event_completed;
pub use list::{get_event, list_events_between, list_week};
pub use todo::{TodoSplit, list_todo, split_todo_by_current_week};
