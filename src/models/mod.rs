pub mod event;
pub mod event_kind;

pub use event::{EventCreate, EventDraft, EventRead, Meta};
pub use event_kind::EventKind;
