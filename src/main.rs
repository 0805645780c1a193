use parcel_tracker::lifecycle::setup_tracing;
use parcel_tracker::storage::Database;
use parcel_tracker::web::{create_router, AppState};
use parcel_tracker::{AppConfig, TrackerError, TrackerSystem};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), TrackerError> {
    setup_tracing();

    let config = AppConfig::from_env()?;
    info!(
        database = %config.database_path.display(),
        bind = %config.bind,
        reject_duplicates = config.reject_duplicates,
        allow_complete_on_create = config.allow_complete_on_create,
        "Starting parcel tracker"
    );

    let system = TrackerSystem::start(
        &Database::new(&config.database_path),
        config.channel_capacity,
    )?;
    let state = AppState::new(system.order_client.clone(), system.log_client.clone(), &config)?;
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(address = %listener.local_addr()?, "Listening");

    // The router (and its client clones) is dropped when serve returns.
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    system.shutdown().await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Ctrl-C received, shutting down");
}
