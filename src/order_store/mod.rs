//! Order table: entity implementation, errors, and the actor factory.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use rusqlite::Connection;
use table_actor::TableActor;

/// Creates the order actor over `conn` and its client.
pub fn new(conn: Connection, capacity: usize) -> (TableActor<Order>, OrderClient) {
    let (actor, generic_client) = TableActor::new(conn, capacity);
    (actor, OrderClient::new(generic_client))
}
