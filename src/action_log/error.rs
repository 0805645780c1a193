use thiserror::Error;

/// Errors that can occur while appending to or reading the action log.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Log database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Something tried to remove an audit record.
    #[error("The action log is append-only")]
    AppendOnly,

    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}
