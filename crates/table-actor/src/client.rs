//! # Generic Client
//!
//! Async handle for sending requests to a [`TableActor`](crate::TableActor).

use crate::entity::TableEntity;
use crate::error::TableError;
use crate::message::TableRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `TableActor`.
///
/// Holds only the sender half of the actor's channel, so cloning is cheap and clones
/// can be shared across request handlers. Dropping every clone shuts the actor down.
pub struct TableClient<T: TableEntity> {
    sender: mpsc::Sender<TableRequest<T>>,
}

impl<T: TableEntity> Clone for TableClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: TableEntity> TableClient<T> {
    pub fn new(sender: mpsc::Sender<TableRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, TableError>>) -> TableRequest<T>,
    ) -> Result<R, TableError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| TableError::ActorClosed)?;
        response.await.map_err(|_| TableError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T, TableError> {
        self.request(|respond_to| TableRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, TableError> {
        self.request(|respond_to| TableRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, TableError> {
        self.request(|respond_to| TableRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, TableError> {
        self.request(|respond_to| TableRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), TableError> {
        self.request(|respond_to| TableRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, TableError> {
        self.request(|respond_to| TableRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
