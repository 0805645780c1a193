use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Performer recorded when a submission names nobody.
pub const UNKNOWN_PERFORMER: &str = "Unknown";

/// Type-safe identifier for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEntryId(pub i64);

impl Display for LogEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for LogEntryId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for LogEntryId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(LogEntryId)
    }
}

/// The actions that are audited. Stored as their display text.
///
/// Handlers only ever write the named variants. The column itself is free text, so rows
/// written by anything else are read back as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    AddOrder,
    AddOrderCompleted,
    UpdateOrder,
    DeleteOrder,
    MarkOrderCompleted,
    Other(String),
}

impl ActionType {
    pub const ALL: [ActionType; 5] = [
        ActionType::AddOrder,
        ActionType::AddOrderCompleted,
        ActionType::UpdateOrder,
        ActionType::DeleteOrder,
        ActionType::MarkOrderCompleted,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ActionType::AddOrder => "Add Order",
            ActionType::AddOrderCompleted => "Add Order (Completed)",
            ActionType::UpdateOrder => "Update Order",
            ActionType::DeleteOrder => "Delete Order",
            ActionType::MarkOrderCompleted => "Mark Order as Completed",
            ActionType::Other(text) => text,
        }
    }

    /// Decodes stored text, keeping anything unrecognised as `Other`.
    pub fn from_stored(text: &str) -> Self {
        text.parse()
            .unwrap_or_else(|_| ActionType::Other(text.to_string()))
    }
}

impl Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one of the known actions. Unrecognised text is an error here; use
/// [`ActionType::from_stored`] when reading rows.
impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionType::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| format!("unknown action type {s:?}"))
    }
}

impl ToSql for ActionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ActionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(ActionType::from_stored)
    }
}

/// One audit record. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: LogEntryId,
    pub action: ActionType,
    pub performer: String,
    pub timestamp: DateTime<Utc>,
}

/// Payload for appending a log entry. The timestamp is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntryCreate {
    pub action: ActionType,
    pub performer: String,
}

impl LogEntryCreate {
    /// Uses `submitted` when it has visible text, otherwise `fallback`.
    pub fn new(action: ActionType, submitted: Option<&str>, fallback: &str) -> Self {
        let performer = submitted
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(fallback);
        Self {
            action,
            performer: performer.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_types_use_their_audit_text() {
        assert_eq!(ActionType::AddOrder.to_string(), "Add Order");
        assert_eq!(
            ActionType::MarkOrderCompleted.to_string(),
            "Mark Order as Completed"
        );
        for action in ActionType::ALL {
            assert_eq!(action.as_str().parse::<ActionType>().unwrap(), action);
        }
        assert!("Add order".parse::<ActionType>().is_err());
    }

    #[test]
    fn stored_text_outside_the_known_actions_is_kept() {
        assert_eq!(ActionType::from_stored("Delete Order"), ActionType::DeleteOrder);

        let foreign = ActionType::from_stored("Export Orders");
        assert_eq!(foreign, ActionType::Other("Export Orders".to_string()));
        assert_eq!(foreign.to_string(), "Export Orders");
    }

    #[test]
    fn blank_performer_falls_back() {
        let named = LogEntryCreate::new(ActionType::DeleteOrder, Some(" Carol "), UNKNOWN_PERFORMER);
        assert_eq!(named.performer, "Carol");

        let blank = LogEntryCreate::new(ActionType::DeleteOrder, Some("   "), UNKNOWN_PERFORMER);
        assert_eq!(blank.performer, UNKNOWN_PERFORMER);

        let absent = LogEntryCreate::new(ActionType::AddOrder, None, "Alice");
        assert_eq!(absent.performer, "Alice");
    }
}
