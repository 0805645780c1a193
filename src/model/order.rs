use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for Orders. Assigned by the database, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub i64);

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for OrderId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for OrderId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(OrderId)
    }
}

/// Delivery state of an order. The only transition is `Ongoing -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Ongoing,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Ongoing => "Ongoing",
            OrderStatus::Completed => "Completed",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ongoing" => Ok(OrderStatus::Ongoing),
            "Completed" => Ok(OrderStatus::Completed),
            other => Err(format!("unknown order status {other:?}")),
        }
    }
}

impl ToSql for OrderStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for OrderStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// The five content fields of an order, as validated from a form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFields {
    pub items: i64,
    pub delivery_date: NaiveDate,
    pub sender_name: String,
    pub recipient_name: String,
    pub recipient_address: String,
}

/// Represents a parcel order.
///
/// This struct implements [`TableEntity`](table_actor::TableEntity) (see
/// [`order_store`](crate::order_store)), so it is served by a
/// [`TableActor`](table_actor::TableActor) over the `orders` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(flatten)]
    pub fields: OrderFields,
    pub status: OrderStatus,
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub fields: OrderFields,
    pub status: OrderStatus,
    /// Skip the insert when a row with identical content fields already exists.
    pub reject_duplicates: bool,
}

impl OrderCreate {
    /// A plain insert of an `Ongoing` order.
    pub fn new(fields: OrderFields) -> Self {
        Self {
            fields,
            status: OrderStatus::Ongoing,
            reject_duplicates: false,
        }
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.status = if completed {
            OrderStatus::Completed
        } else {
            OrderStatus::Ongoing
        };
        self
    }

    pub fn reject_duplicates(mut self, reject: bool) -> Self {
        self.reject_duplicates = reject;
        self
    }
}

/// Order-specific operations beyond CRUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Set the status to `Completed`. Replies whether the status changed.
    MarkCompleted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for status in [OrderStatus::Ongoing, OrderStatus::Completed] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("Cancelled".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn create_builder_defaults_to_ongoing() {
        let fields = OrderFields {
            items: 1,
            delivery_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            sender_name: "Alice".into(),
            recipient_name: "Bob".into(),
            recipient_address: "1 Main St".into(),
        };
        let plain = OrderCreate::new(fields.clone());
        assert_eq!(plain.status, OrderStatus::Ongoing);
        assert!(!plain.reject_duplicates);

        let flagged = OrderCreate::new(fields).completed(true).reject_duplicates(true);
        assert_eq!(flagged.status, OrderStatus::Completed);
        assert!(flagged.reject_duplicates);
    }
}
