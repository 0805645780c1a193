//! [`TableEntity`] implementation for [`LogEntry`] over the append-only `logs` table.

use crate::action_log::LogError;
use crate::model::{LogEntry, LogEntryCreate, LogEntryId};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use std::convert::Infallible;
use table_actor::TableEntity;

impl TableEntity for LogEntry {
    type Id = LogEntryId;
    type Create = LogEntryCreate;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Error = LogError;

    const TABLE: &'static str = "logs";
    const COLUMNS: &'static str = "id, type, performer, timestamp";
    // Equal timestamps fall back to insertion order, newest first.
    const ORDER_BY: &'static str = "timestamp DESC, id DESC";
    const APPEND_ONLY: bool = true;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            action: row.get(1)?,
            performer: row.get(2)?,
            timestamp: row.get(3)?,
        })
    }

    fn insert(conn: &Connection, params: LogEntryCreate) -> Result<Self, LogError> {
        let timestamp = Utc::now();
        conn.execute(
            "INSERT INTO logs (type, performer, timestamp) VALUES (?1, ?2, ?3)",
            params![params.action, params.performer, timestamp],
        )?;
        Ok(Self {
            id: LogEntryId(conn.last_insert_rowid()),
            action: params.action,
            performer: params.performer,
            timestamp,
        })
    }

    fn on_update(_: &Connection, _: LogEntryId, update: Infallible) -> Result<Option<Self>, LogError> {
        match update {}
    }

    fn handle_action(_: &Connection, _: LogEntryId, action: Infallible) -> Result<Option<()>, LogError> {
        match action {}
    }
}
