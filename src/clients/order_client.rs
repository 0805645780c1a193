use crate::model::{Order, OrderAction, OrderCreate, OrderFields, OrderId};
use crate::order_store::OrderError;
use async_trait::async_trait;
use table_actor::{EntityClient, TableClient, TableError};
use tracing::{debug, instrument};

/// Client for interacting with the order actor.
///
/// The duplicate guard runs inside the actor as part of the insert, so two identical
/// submissions racing each other still produce a single row.
#[derive(Clone)]
pub struct OrderClient {
    inner: TableClient<Order>,
}

impl OrderClient {
    pub fn new(inner: TableClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, order))]
    pub async fn create_order(&self, order: OrderCreate) -> Result<Order, OrderError> {
        debug!(?order, "create_order called");
        self.inner.create(order).await.map_err(Self::map_error)
    }

    /// Overwrites the content fields of order `id`. Status is not touched.
    #[instrument(skip(self, fields))]
    pub async fn update_order(&self, id: OrderId, fields: OrderFields) -> Result<Order, OrderError> {
        debug!(?fields, "update_order called");
        self.inner.update(id, fields).await.map_err(Self::map_error)
    }

    /// Marks order `id` as completed. Returns whether the status changed.
    #[instrument(skip(self))]
    pub async fn mark_completed(&self, id: OrderId) -> Result<bool, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::MarkCompleted)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl EntityClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &TableClient<Order> {
        &self.inner
    }

    fn map_error(e: TableError) -> OrderError {
        match e.into_entity::<OrderError>() {
            Ok(entity) => entity,
            Err(TableError::NotFound { id, .. }) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunication(other.to_string()),
        }
    }
}
