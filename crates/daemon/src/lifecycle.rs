// SPDX-License-Identifier: MIT

//! Daemon-wide startup/shutdown orchestration, grounded in
//! `oj-daemon`'s `lifecycle/startup.rs`: bring every subsystem up in
//! dependency order, and tear them down in the reverse order on
//! shutdown.

use std::sync::Arc;

use tracing::info;

use venue_pool::WorkerPool;

use crate::coordinator::Coordinator;
use crate::receiver::EventReceiver;

/// Owns the three long-running subsystems and sequences their
/// lifecycle: the worker pool first (so a telemetry message arriving
/// the instant the coordinator starts has somewhere to land), then
/// the coordinator (which loads `BoardsToWatch` and starts its
/// periodic loops), then the event receiver (so no provisioning event
/// is dispatched before the coordinator is ready for it). Shutdown
/// reverses the order.
pub struct Daemon {
    pool: Arc<WorkerPool>,
    coordinator: Arc<Coordinator>,
    receiver: Arc<EventReceiver>,
}

impl Daemon {
    pub fn new(pool: Arc<WorkerPool>, coordinator: Arc<Coordinator>, receiver: Arc<EventReceiver>) -> Self {
        Self { pool, coordinator, receiver }
    }

    pub async fn start(&self) {
        info!("starting worker pool");
        self.pool.start().await;

        info!("starting coordinator");
        self.coordinator.start().await;

        info!("starting event receiver");
        self.receiver.start().await;

        info!("daemon started");
    }

    pub async fn shutdown(&self) {
        info!("stopping event receiver");
        self.receiver.stop().await;

        info!("stopping coordinator");
        self.coordinator.stop().await;

        info!("stopping worker pool");
        self.pool.stop().await;

        info!("daemon stopped");
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
