//! Error types for the order store.

use crate::model::OrderId;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// An order with identical content already exists.
    #[error("Order duplicates existing order {0}")]
    Duplicate(OrderId),

    /// An underlying database error occurred.
    #[error("Order database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An error occurred while communicating with the actor.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl OrderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, OrderError::NotFound(_))
    }
}
