//! # EntityClient Trait
//!
//! Common interface for table-specific clients. Domain clients wrap a [`TableClient`]
//! and get `get`, `list` and `delete` for free, with framework errors mapped into their
//! own error type.
use crate::{TableClient, TableEntity, TableError};
use async_trait::async_trait;

/// Trait for table-specific clients to inherit the standard read and delete operations.
///
/// ```rust,ignore
/// #[derive(Clone)]
/// pub struct OrderClient {
///     inner: TableClient<Order>,
/// }
///
/// #[async_trait]
/// impl EntityClient<Order> for OrderClient {
///     type Error = OrderError;
///
///     fn inner(&self) -> &TableClient<Order> {
///         &self.inner
///     }
///
///     fn map_error(e: TableError) -> OrderError {
///         OrderError::ActorCommunication(e.to_string())
///     }
/// }
///
/// // get(), list() and delete() are now available on OrderClient.
/// ```
#[async_trait]
pub trait EntityClient<T: TableEntity>: Send + Sync {
    /// The table-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic `TableClient`.
    fn inner(&self) -> &TableClient<T>;

    /// Map framework errors to the table-specific error type.
    fn map_error(e: TableError) -> Self::Error;

    /// Fetch a row by id.
    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every row in the table's listing order.
    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete a row by id.
    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
