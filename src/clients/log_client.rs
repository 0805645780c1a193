use crate::action_log::LogError;
use crate::model::{ActionType, LogEntry, LogEntryCreate};
use async_trait::async_trait;
use table_actor::{EntityClient, TableClient, TableError};
use tracing::{debug, instrument};

/// Client for the append-only action log.
#[derive(Clone)]
pub struct LogClient {
    inner: TableClient<LogEntry>,
}

impl LogClient {
    pub fn new(inner: TableClient<LogEntry>) -> Self {
        Self { inner }
    }

    /// Records `action`, attributed to `submitted` when it has visible text and to
    /// `fallback` otherwise. The timestamp is taken by the log actor.
    #[instrument(skip(self))]
    pub async fn append(
        &self,
        action: ActionType,
        submitted: Option<&str>,
        fallback: &str,
    ) -> Result<LogEntry, LogError> {
        debug!("Sending request");
        self.inner
            .create(LogEntryCreate::new(action, submitted, fallback))
            .await
            .map_err(Self::map_error)
    }

    /// Every entry, newest first.
    pub async fn list_recent_first(&self) -> Result<Vec<LogEntry>, LogError> {
        self.list().await
    }
}

#[async_trait]
impl EntityClient<LogEntry> for LogClient {
    type Error = LogError;

    fn inner(&self) -> &TableClient<LogEntry> {
        &self.inner
    }

    fn map_error(e: TableError) -> LogError {
        match e.into_entity::<LogError>() {
            Ok(entity) => entity,
            Err(TableError::AppendOnly(_)) => LogError::AppendOnly,
            Err(other) => LogError::ActorCommunication(other.to_string()),
        }
    }
}
