//! # Generic Messages
//!
//! Request type exchanged between a [`TableClient`](crate::TableClient) and its
//! [`TableActor`](crate::TableActor).

use crate::entity::TableEntity;
use crate::error::TableError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, TableError>>;

/// A request to the actor that owns one table.
///
/// The variants are the CRUD lifecycle of a row plus `Action` for table-specific
/// operations. Payload types come from the [`TableEntity`] associated types, so an
/// order payload can never reach the log table.
#[derive(Debug)]
pub enum TableRequest<T: TableEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
