//! # Table Actor
//!
//! Building blocks for serving SQLite tables through actors. Each table is owned by one
//! [`TableActor`] that holds the connection and answers requests sequentially; the rest
//! of the program talks to it through a cheap, cloneable [`TableClient`].
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`TableEntity`]): the row type, its payloads and its SQL.
//! 2. **Runtime Layer** ([`TableActor`]): request loop on a blocking thread.
//! 3. **Interface Layer** ([`TableClient`], [`EntityClient`]): async, type-safe calls.
//!
//! Reads and deletes are implemented once on the trait from `TABLE`, `COLUMNS` and
//! `from_row`. A table only writes the SQL that is really its own: insert, update and
//! custom actions.
//!
//! ## Example
//!
//! ```rust
//! use rusqlite::{Connection, Row};
//! use std::convert::Infallible;
//! use table_actor::{TableActor, TableEntity};
//!
//! #[derive(Clone, Debug)]
//! struct Note {
//!     id: i64,
//!     body: String,
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error(transparent)]
//! struct NoteError(#[from] rusqlite::Error);
//!
//! impl TableEntity for Note {
//!     type Id = i64;
//!     type Create = String;
//!     type Update = String;
//!     type Action = Infallible;
//!     type ActionResult = ();
//!     type Error = NoteError;
//!
//!     const TABLE: &'static str = "notes";
//!     const COLUMNS: &'static str = "id, body";
//!
//!     fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
//!         Ok(Self { id: row.get(0)?, body: row.get(1)? })
//!     }
//!
//!     fn insert(conn: &Connection, body: String) -> Result<Self, NoteError> {
//!         conn.execute("INSERT INTO notes (body) VALUES (?1)", [&body])?;
//!         Ok(Self { id: conn.last_insert_rowid(), body })
//!     }
//!
//!     fn on_update(conn: &Connection, id: i64, body: String) -> Result<Option<Self>, NoteError> {
//!         let changed = conn.execute(
//!             "UPDATE notes SET body = ?1 WHERE id = ?2",
//!             rusqlite::params![body, id],
//!         )?;
//!         Ok((changed > 0).then(|| Self { id, body }))
//!     }
//!
//!     fn handle_action(_: &Connection, _: i64, action: Infallible) -> Result<Option<()>, NoteError> {
//!         match action {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let conn = Connection::open_in_memory()?;
//!     conn.execute_batch("CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT NOT NULL)")?;
//!
//!     let (actor, client) = TableActor::<Note>::new(conn, 8);
//!     let handle = actor.spawn();
//!
//!     let note = client.create("ring twice".to_string()).await?;
//!     let fetched = client.get(note.id).await?.expect("note exists");
//!     assert_eq!(fetched.body, "ring twice");
//!
//!     drop(client);
//!     handle.await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a client's requests from scripted expectations, so code
//! built on a client can be tested without a database. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::TableActor;
pub use client::TableClient;
pub use client_trait::EntityClient;
pub use entity::TableEntity;
pub use error::TableError;
pub use message::{Response, TableRequest};
