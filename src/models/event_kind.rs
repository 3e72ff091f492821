use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of event categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Action,
    Decision,
    Idea,
    Paper,
    Note,
    Meeting,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Action,
        EventKind::Decision,
        EventKind::Idea,
        EventKind::Paper,
        EventKind::Note,
        EventKind::Meeting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Action => "action",
            EventKind::Decision => "decision",
            EventKind::Idea => "idea",
            EventKind::Paper => "paper",
            EventKind::Note => "note",
            EventKind::Meeting => "meeting",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.as_str()
    }

    /// Convert DB string → enum (exact match only)
    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Comma-separated list used in help and error messages.
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn is_action(&self) -> bool {
        matches!(self, EventKind::Action)
    }

    pub fn requires_due_date(&self) -> bool {
        matches!(self, EventKind::Meeting)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db_str(s).ok_or_else(|| {
            AppError::Validation(format!(
                "unknown kind '{}'; expected one of: {}",
                s,
                Self::names()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_variant() {
        for kind in EventKind::ALL {
            assert_eq!(kind.as_str().parse::<EventKind>().unwrap(), kind);
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        for raw in ["Meeting", "IDEA", " note"] {
            let err = raw.parse::<EventKind>().unwrap_err();
            assert!(err.is_validation(), "{raw}");
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "task".parse::<EventKind>().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("task"));
    }

    #[test]
    fn db_conversion_is_exact() {
        assert_eq!(EventKind::from_db_str("idea"), Some(EventKind::Idea));
        assert_eq!(EventKind::from_db_str("IDEA"), None);
    }

    #[test]
    fn serde_rejects_other_values() {
        let ok: EventKind = serde_json::from_str("\"paper\"").unwrap();
        assert_eq!(ok, EventKind::Paper);
        assert!(serde_json::from_str::<EventKind>("\"chore\"").is_err());
    }
}
