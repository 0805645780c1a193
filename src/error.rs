//! Process-level errors: everything that can stop the tracker from starting or from
//! shutting down cleanly. Per-request failures live in [`crate::web::WebError`].

use crate::config::ConfigError;
use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}
