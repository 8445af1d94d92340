// SPDX-License-Identifier: MIT

//! Entrypoint for the venue analytics coordinator daemon.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use venue_daemon::{Coordinator, Daemon, EventReceiver, PoolConfig, TelemetryWatcherFactory, WorkerPool};
use venue_daemon::{BoardsStore, DaemonConfig, ProvisioningSdk, TimePointsStore, WatcherFactory};
use venue_provisioning::FakeProvisioningSdk;
use venue_storage::{FileBoardsStore, InMemoryTimePointsStore};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match DaemonConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to resolve daemon configuration: {e}");
            std::process::exit(1);
        }
    };

    let boards_store: Arc<dyn BoardsStore> = match FileBoardsStore::open(&config.boards_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            eprintln!("failed to open board store at {}: {e}", config.boards_path.display());
            std::process::exit(1);
        }
    };
    let time_points_store: Arc<dyn TimePointsStore> = Arc::new(InMemoryTimePointsStore::new());
    let provisioning_sdk: Arc<dyn ProvisioningSdk> = Arc::new(FakeProvisioningSdk::new());

    let registry = Arc::new(NoopTelemetryRegistry);
    let watcher_factory: Arc<dyn WatcherFactory> = Arc::new(TelemetryWatcherFactory::new(registry));

    let coordinator =
        Arc::new(Coordinator::new(boards_store, time_points_store, provisioning_sdk, watcher_factory));

    let pool = Arc::new(WorkerPool::new(PoolConfig::from_env()));

    // No provisioning bus is wired up by default; operators pass one in
    // by swapping this `None` for a concrete `ProvisioningBus` once a
    // transport (e.g. a message queue consumer) is available.
    let receiver = Arc::new(EventReceiver::new(None, Arc::clone(&coordinator)));

    let daemon = Daemon::new(pool, coordinator, receiver);
    daemon.start().await;

    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received shutdown signal"),
        Err(e) => tracing::error!(error = %e, "failed to listen for shutdown signal"),
    }

    daemon.shutdown().await;
}

struct NoopTelemetryRegistry;

impl venue_daemon::TelemetryRegistry for NoopTelemetryRegistry {
    fn register(&self, _board_id: &venue_daemon::BoardId, _serials: &[venue_daemon::Serial]) {}
    fn deregister(&self, _board_id: &venue_daemon::BoardId, _serials: &[venue_daemon::Serial]) {}
}
