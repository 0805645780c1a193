use crate::clients::{LogClient, OrderClient};
use crate::error::TrackerError;
use crate::storage::{Database, StorageError};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Owns the two table actors and hands out their clients.
///
/// `TrackerSystem` is responsible for:
/// - **Schema**: running the migration before any actor opens the database
/// - **Wiring**: one connection per actor, both on the same database file
/// - **Lifecycle**: joining the actor threads on shutdown
///
/// ```ignore
/// let system = TrackerSystem::start(&Database::new("instance/database.db"), 32)?;
/// let state = AppState::new(system.order_client.clone(), system.log_client.clone(), ...);
/// // ... serve until Ctrl-C, then drop the router ...
/// system.shutdown().await?;
/// ```
pub struct TrackerSystem {
    pub order_client: OrderClient,
    pub log_client: LogClient,
    handles: Vec<JoinHandle<()>>,
}

impl TrackerSystem {
    /// Migrates the schema and spawns both actors. Must be called inside a Tokio runtime.
    pub fn start(database: &Database, channel_capacity: usize) -> Result<Self, StorageError> {
        database.migrate()?;

        let (order_actor, order_client) =
            crate::order_store::new(database.connect()?, channel_capacity);
        let (log_actor, log_client) = crate::action_log::new(database.connect()?, channel_capacity);

        let handles = vec![order_actor.spawn(), log_actor.spawn()];
        info!(path = %database.path().display(), "Tracker started");

        Ok(Self {
            order_client,
            log_client,
            handles,
        })
    }

    /// Closes the actors' channels and waits for their threads to finish.
    ///
    /// An actor only stops once every clone of its client is gone, so anything holding a
    /// clone (the router state) must be dropped first.
    pub async fn shutdown(self) -> Result<(), TrackerError> {
        info!("Shutting down tracker...");
        drop(self.order_client);
        drop(self.log_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(TrackerError::ActorTask(e));
            }
        }

        info!("Tracker shutdown complete.");
        Ok(())
    }
}
