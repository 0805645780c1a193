//! # TableEntity Trait
//!
//! The `TableEntity` trait is the contract a row type must satisfy to be served by a
//! [`TableActor`](crate::TableActor). It names the table, the id type and the payloads
//! for every operation, and supplies the SQL that differs per table. Reads and deletes
//! are written once here as provided methods; inserts, updates and custom actions are
//! entity-specific.
//!
//! # Append-only tables
//! A table that must never lose rows sets [`TableEntity::APPEND_ONLY`] and uses
//! [`std::convert::Infallible`] for `Update` and `Action`. The actor then refuses delete
//! requests, and update or action requests cannot be constructed at all.

use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};
use std::fmt::{Debug, Display};

/// Trait that any row type must implement to be managed by a `TableActor`.
///
/// Every hook receives the actor's connection. Hooks run on the actor's thread, one
/// request at a time, so a hook may read and then write without another request
/// interleaving on the same table.
pub trait TableEntity: Clone + Send + Sync + 'static {
    /// Primary key of the table. Bound as a SQL parameter by the provided methods.
    type Id: Copy + Eq + Send + Sync + Display + Debug + ToSql;

    /// The data required to insert a new row.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing row.
    type Update: Send + Sync + Debug;

    /// Table-specific operations on a single row (e.g. a status transition).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The error type for this table. Storage failures convert into it.
    type Error: std::error::Error + From<rusqlite::Error> + Send + Sync + 'static;

    /// Name of the backing table.
    const TABLE: &'static str;

    /// Column list selected by [`fetch`](Self::fetch) and [`fetch_all`](Self::fetch_all),
    /// in the order [`from_row`](Self::from_row) reads them.
    const COLUMNS: &'static str;

    /// `ORDER BY` clause used by [`fetch_all`](Self::fetch_all).
    const ORDER_BY: &'static str = "id ASC";

    /// When set, the actor refuses every delete request.
    const APPEND_ONLY: bool = false;

    /// Decode one row selected with [`COLUMNS`](Self::COLUMNS).
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Insert a new row and return it as persisted, including its assigned id.
    fn insert(conn: &Connection, params: Self::Create) -> Result<Self, Self::Error>;

    /// Apply an update. Returns `Ok(None)` when no row has this id.
    fn on_update(
        conn: &Connection,
        id: Self::Id,
        update: Self::Update,
    ) -> Result<Option<Self>, Self::Error>;

    /// Run a custom action. Returns `Ok(None)` when no row has this id.
    fn handle_action(
        conn: &Connection,
        id: Self::Id,
        action: Self::Action,
    ) -> Result<Option<Self::ActionResult>, Self::Error>;

    // --- Provided Methods ---

    /// Fetch a single row by id.
    fn fetch(conn: &Connection, id: Self::Id) -> Result<Option<Self>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?1",
            Self::COLUMNS,
            Self::TABLE
        );
        let mut stmt = conn.prepare_cached(&sql)?;
        let row = stmt.query_row(params![id], Self::from_row).optional()?;
        Ok(row)
    }

    /// Fetch every row, ordered by [`ORDER_BY`](Self::ORDER_BY).
    fn fetch_all(conn: &Connection) -> Result<Vec<Self>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            Self::COLUMNS,
            Self::TABLE,
            Self::ORDER_BY
        );
        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt
            .query_map([], Self::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Remove a row permanently. Returns `false` when no row has this id.
    fn remove(conn: &Connection, id: Self::Id) -> Result<bool, Self::Error> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", Self::TABLE);
        let removed = conn.execute(&sql, params![id])?;
        Ok(removed > 0)
    }
}
