//! Event shapes shared by the CLI and the HTTP API.
//!
//! - [`EventDraft`]: raw caller input, not yet checked.
//! - [`EventCreate`]: validated create shape. Fields are private so the
//!   invariants checked in [`EventDraft::validate`] cannot be broken later.
//! - [`EventRead`]: a full persisted row as returned by the operations layer.

use super::event_kind::EventKind;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form JSON metadata attached to an event.
pub type Meta = serde_json::Map<String, serde_json::Value>;

pub const MAX_TAG_LEN: usize = 64;
pub const MAX_SOURCE_LEN: usize = 64;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventDraft {
    pub kind: String,
    pub text: String,
    #[serde(default)]
    pub why: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
}

impl EventDraft {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn why(mut self, why: impl Into<String>) -> Self {
        self.why = Some(why.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    pub fn due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Check the draft and turn it into an immutable [`EventCreate`].
    pub fn validate(self) -> AppResult<EventCreate> {
        let kind: EventKind = self.kind.parse()?;

        if self.text.is_empty() {
            return Err(AppError::Validation("text must not be empty".into()));
        }

        if kind.requires_due_date() && self.due_at.is_none() {
            return Err(AppError::Validation(format!(
                "a {} event requires a due date",
                kind
            )));
        }

        if let Some(tag) = self
            .tags
            .iter()
            .find(|t| t.chars().count() > MAX_TAG_LEN)
        {
            return Err(AppError::Validation(format!(
                "tag '{}' is longer than {} characters",
                tag, MAX_TAG_LEN
            )));
        }

        if let Some(src) = &self.source
            && src.chars().count() > MAX_SOURCE_LEN
        {
            return Err(AppError::Validation(format!(
                "source is longer than {} characters",
                MAX_SOURCE_LEN
            )));
        }

        Ok(EventCreate {
            kind,
            text: self.text,
            why: self.why,
            source: self.source,
            tags: self.tags,
            meta: self.meta,
            due_at: self.due_at,
        })
    }
}

/// Validated create shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EventDraft")]
pub struct EventCreate {
    kind: EventKind,
    text: String,
    why: Option<String>,
    source: Option<String>,
    tags: Vec<String>,
    meta: Meta,
    due_at: Option<DateTime<Utc>>,
}

impl TryFrom<EventDraft> for EventCreate {
    type Error = AppError;

    fn try_from(draft: EventDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl EventCreate {
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn why(&self) -> Option<&str> {
        self.why.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }
}

/// Read shape: one persisted `events` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRead {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub kind: EventKind,
    pub text: String,
    pub why: Option<String>,
    pub source: Option<String>,
    pub tags: Vec<String>,
    pub meta: Meta,
    pub due_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl EventRead {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// An action with a due date that has not been completed yet.
    pub fn is_pending_todo(&self) -> bool {
        self.kind.is_action() && self.due_at.is_some() && !self.is_completed()
    }
}
