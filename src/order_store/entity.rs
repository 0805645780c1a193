//! [`TableEntity`] implementation that lets [`Order`] be served by a
//! [`TableActor`](table_actor::TableActor) over the `orders` table.

use crate::model::{Order, OrderAction, OrderCreate, OrderFields, OrderId, OrderStatus};
use crate::order_store::OrderError;
use rusqlite::{params, Connection, OptionalExtension, Row};
use table_actor::TableEntity;
use tracing::debug;

impl Order {
    /// Id of a stored order whose five content fields equal `fields`, if any.
    fn find_duplicate(conn: &Connection, fields: &OrderFields) -> rusqlite::Result<Option<OrderId>> {
        let mut stmt = conn.prepare_cached(
            "SELECT id FROM orders
             WHERE items = ?1 AND delivery_date = ?2 AND sender_name = ?3
               AND recipient_name = ?4 AND recipient_address = ?5
             LIMIT 1",
        )?;
        stmt.query_row(
            params![
                fields.items,
                fields.delivery_date,
                fields.sender_name,
                fields.recipient_name,
                fields.recipient_address
            ],
            |row| row.get(0),
        )
        .optional()
    }

    fn exists(conn: &Connection, id: OrderId) -> rusqlite::Result<bool> {
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM orders WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )
    }
}

impl TableEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderFields;
    type Action = OrderAction;
    type ActionResult = bool;
    type Error = OrderError;

    const TABLE: &'static str = "orders";
    const COLUMNS: &'static str =
        "id, items, delivery_date, sender_name, recipient_name, recipient_address, status";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            fields: OrderFields {
                items: row.get(1)?,
                delivery_date: row.get(2)?,
                sender_name: row.get(3)?,
                recipient_name: row.get(4)?,
                recipient_address: row.get(5)?,
            },
            status: row.get(6)?,
        })
    }

    /// Inserts the order. With `reject_duplicates` set, an existing row with the same
    /// content fields aborts the insert with [`OrderError::Duplicate`].
    fn insert(conn: &Connection, params: OrderCreate) -> Result<Self, OrderError> {
        if params.reject_duplicates {
            if let Some(existing) = Self::find_duplicate(conn, &params.fields)? {
                debug!(%existing, "Duplicate order");
                return Err(OrderError::Duplicate(existing));
            }
        }

        let fields = params.fields;
        conn.execute(
            "INSERT INTO orders
                (items, delivery_date, sender_name, recipient_name, recipient_address, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                fields.items,
                fields.delivery_date,
                fields.sender_name,
                fields.recipient_name,
                fields.recipient_address,
                params.status
            ],
        )?;

        Ok(Self {
            id: OrderId(conn.last_insert_rowid()),
            fields,
            status: params.status,
        })
    }

    /// Overwrites the content fields. Status is left alone.
    fn on_update(
        conn: &Connection,
        id: OrderId,
        fields: OrderFields,
    ) -> Result<Option<Self>, OrderError> {
        let changed = conn.execute(
            "UPDATE orders
             SET items = ?1, delivery_date = ?2, sender_name = ?3,
                 recipient_name = ?4, recipient_address = ?5
             WHERE id = ?6",
            params![
                fields.items,
                fields.delivery_date,
                fields.sender_name,
                fields.recipient_name,
                fields.recipient_address,
                id
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        Self::fetch(conn, id)
    }

    fn handle_action(
        conn: &Connection,
        id: OrderId,
        action: OrderAction,
    ) -> Result<Option<bool>, OrderError> {
        match action {
            OrderAction::MarkCompleted => {
                let changed = conn.execute(
                    "UPDATE orders SET status = ?1 WHERE id = ?2 AND status <> ?1",
                    params![OrderStatus::Completed, id],
                )?;
                if changed > 0 {
                    return Ok(Some(true));
                }
                // Already completed, or no such row.
                Ok(Self::exists(conn, id)?.then_some(false))
            }
        }
    }
}
