//! # Table Actor
//!
//! The `TableActor` is the server half of a table: it owns the SQLite connection and
//! the receiving end of the request channel, and answers requests one at a time.

use crate::client::TableClient;
use crate::entity::TableEntity;
use crate::error::TableError;
use crate::message::TableRequest;
use rusqlite::Connection;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// The actor that owns one table.
///
/// # Concurrency Model
/// rusqlite calls are blocking, so the actor does not live on the async executor. It
/// runs on a blocking thread (see [`spawn`](Self::spawn)) and pulls requests with
/// `blocking_recv`. Clients stay fully async: they only await the channel send and the
/// one-shot reply. Because the connection is owned by a single thread and requests are
/// handled sequentially, no lock is needed around it.
///
/// # Usage Pattern
///
/// ```rust,ignore
/// let conn = rusqlite::Connection::open("tracker.db")?;
/// let (actor, client) = TableActor::<Order>::new(conn, 32);
/// let handle = actor.spawn();
///
/// let order = client.create(params).await?;
///
/// drop(client);       // closes the channel
/// handle.await?;      // actor drains and exits
/// ```
///
/// ## Operations
///
/// * **Create**: calls [`TableEntity::insert`] and replies with the persisted row.
/// * **Get**: calls [`TableEntity::fetch`]; a missing row is `Ok(None)`.
/// * **List**: calls [`TableEntity::fetch_all`].
/// * **Update**: calls [`TableEntity::on_update`]; a missing row is
///   [`TableError::NotFound`].
/// * **Delete**: refused with [`TableError::AppendOnly`] for append-only tables,
///   otherwise calls [`TableEntity::remove`]; a missing row is `NotFound`.
/// * **Action**: calls [`TableEntity::handle_action`]; a missing row is `NotFound`.
pub struct TableActor<T: TableEntity> {
    receiver: mpsc::Receiver<TableRequest<T>>,
    conn: Connection,
}

fn entity_error<E>(e: E) -> TableError
where
    E: std::error::Error + Send + Sync + 'static,
{
    TableError::Entity(Box::new(e))
}

impl<T: TableEntity> TableActor<T> {
    /// Creates a new `TableActor` over `conn` and its associated `TableClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client
    /// calls wait until the actor catches up.
    pub fn new(conn: Connection, buffer_size: usize) -> (Self, TableClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, conn };
        (actor, TableClient::new(sender))
    }

    /// Runs the actor on a dedicated blocking thread.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::task::spawn_blocking(move || self.run())
    }

    /// Processes requests until every client has been dropped.
    ///
    /// Blocks the calling thread. Must not be called from inside an async task.
    pub fn run(mut self) {
        let table = T::TABLE;
        info!(table, "Actor started");

        while let Some(msg) = self.receiver.blocking_recv() {
            match msg {
                TableRequest::Create { params, respond_to } => {
                    debug!(table, ?params, "Create");
                    let result = T::insert(&self.conn, params).map_err(entity_error);
                    match &result {
                        Ok(_) => info!(table, id = self.conn.last_insert_rowid(), "Created"),
                        Err(e) => warn!(table, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                TableRequest::Get { id, respond_to } => {
                    let result = T::fetch(&self.conn, id).map_err(entity_error);
                    let found = matches!(result, Ok(Some(_)));
                    debug!(table, %id, found, "Get");
                    let _ = respond_to.send(result);
                }
                TableRequest::List { respond_to } => {
                    let result = T::fetch_all(&self.conn).map_err(entity_error);
                    if let Ok(rows) = &result {
                        debug!(table, rows = rows.len(), "List");
                    }
                    let _ = respond_to.send(result);
                }
                TableRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(table, %id, ?update, "Update");
                    let result = match T::on_update(&self.conn, id, update) {
                        Ok(Some(row)) => {
                            info!(table, %id, "Updated");
                            Ok(row)
                        }
                        Ok(None) => {
                            warn!(table, %id, "Not found");
                            Err(TableError::NotFound {
                                table,
                                id: id.to_string(),
                            })
                        }
                        Err(e) => {
                            warn!(table, %id, error = %e, "Update failed");
                            Err(entity_error(e))
                        }
                    };
                    let _ = respond_to.send(result);
                }
                TableRequest::Delete { id, respond_to } => {
                    debug!(table, %id, "Delete");
                    if T::APPEND_ONLY {
                        warn!(table, %id, "Delete refused");
                        let _ = respond_to.send(Err(TableError::AppendOnly(table)));
                        continue;
                    }
                    let result = match T::remove(&self.conn, id) {
                        Ok(true) => {
                            info!(table, %id, "Deleted");
                            Ok(())
                        }
                        Ok(false) => {
                            warn!(table, %id, "Not found");
                            Err(TableError::NotFound {
                                table,
                                id: id.to_string(),
                            })
                        }
                        Err(e) => {
                            warn!(table, %id, error = %e, "Delete failed");
                            Err(entity_error(e))
                        }
                    };
                    let _ = respond_to.send(result);
                }
                TableRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(table, %id, ?action, "Action");
                    let result = match T::handle_action(&self.conn, id, action) {
                        Ok(Some(outcome)) => {
                            info!(table, %id, "Action ok");
                            Ok(outcome)
                        }
                        Ok(None) => {
                            warn!(table, %id, "Not found");
                            Err(TableError::NotFound {
                                table,
                                id: id.to_string(),
                            })
                        }
                        Err(e) => {
                            warn!(table, %id, error = %e, "Action failed");
                            Err(entity_error(e))
                        }
                    };
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(table, "Shutdown");
    }
}
