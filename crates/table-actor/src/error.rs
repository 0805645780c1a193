//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, as opposed to the per-table error types
//! carried inside [`TableError::Entity`].

/// Errors that can occur between a `TableClient` and its `TableActor`.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("No row {id} in {table}")]
    NotFound { table: &'static str, id: String },
    #[error("Table {0} is append-only")]
    AppendOnly(&'static str),
    #[error("Entity error: {0}")]
    Entity(Box<dyn std::error::Error + Send + Sync>),
}

impl TableError {
    /// Recover the concrete entity error carried by [`TableError::Entity`].
    ///
    /// Returns `self` unchanged when the error is a framework error or the boxed error
    /// is of a different type.
    pub fn into_entity<E>(self) -> Result<E, TableError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            TableError::Entity(inner) => match inner.downcast::<E>() {
                Ok(entity) => Ok(*entity),
                Err(other) => Err(TableError::Entity(other)),
            },
            other => Err(other),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TableError::NotFound { .. })
    }
}
