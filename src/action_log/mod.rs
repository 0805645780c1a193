//! Append-only audit log of order actions.
//!
//! Entries are only ever inserted. The actor refuses deletes and the entity's update and
//! action payloads are uninhabited, so no request can change a stored entry.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::LogClient;
use crate::model::LogEntry;
use rusqlite::Connection;
use table_actor::TableActor;

/// Creates the log actor over `conn` and its client.
pub fn new(conn: Connection, capacity: usize) -> (TableActor<LogEntry>, LogClient) {
    let (actor, generic_client) = TableActor::new(conn, capacity);
    (actor, LogClient::new(generic_client))
}
