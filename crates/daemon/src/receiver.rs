// SPDX-License-Identifier: MIT

//! The provisioning event receiver, spec.md §4.a / §4.b: drains a
//! change-event bus and hands each decoded event to the coordinator.
//! A missing bus (no `ProvisioningBus` configured) leaves the receiver
//! permanently idle rather than erroring -- the daemon still serves
//! whatever boards were already in the store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

use venue_wire::parse_provisioning_event;

use crate::coordinator::Coordinator;

/// The subset of a change-event transport the receiver depends on:
/// one raw payload per change, or `None` once the bus is closed.
#[async_trait]
pub trait ProvisioningBus: Send + Sync {
    async fn recv(&self) -> Option<Vec<u8>>;
}

/// Drains a [`ProvisioningBus`] and dispatches each decoded event to a
/// [`Coordinator`]. With no bus configured, `start`/`stop` are no-ops.
pub struct EventReceiver {
    bus: Option<Arc<dyn ProvisioningBus>>,
    coordinator: Arc<Coordinator>,
    running: AtomicBool,
    shutdown: CancellationToken,
    task: tokio::sync::Mutex<Option<JoinHandle<()>>>,
}

impl EventReceiver {
    pub fn new(bus: Option<Arc<dyn ProvisioningBus>>, coordinator: Arc<Coordinator>) -> Self {
        Self {
            bus,
            coordinator,
            running: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
            task: tokio::sync::Mutex::new(None),
        }
    }

    /// Spawn the consume loop. A receiver with no bus stays idle.
    /// Idempotent.
    pub async fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        let Some(bus) = self.bus.clone() else {
            return;
        };
        let coordinator = Arc::clone(&self.coordinator);
        let shutdown = self.shutdown.clone();
        let handle = tokio::spawn(async move { consume_loop(bus, coordinator, shutdown).await });
        *self.task.lock().await = Some(handle);
    }

    /// Signal shutdown and join the consume loop. Idempotent.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        self.shutdown.cancel();
        if let Some(handle) = self.task.lock().await.take() {
            let _ = handle.await;
        }
    }
}

async fn consume_loop(bus: Arc<dyn ProvisioningBus>, coordinator: Arc<Coordinator>, shutdown: CancellationToken) {
    loop {
        let payload = tokio::select! {
            _ = shutdown.cancelled() => break,
            payload = bus.recv() => payload,
        };
        let Some(payload) = payload else {
            warn!("provisioning bus closed, event receiver stopping");
            break;
        };

        let event = match parse_provisioning_event(&payload) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "dropping malformed provisioning event payload");
                continue;
            }
        };

        // Defense in depth: a panic inside coordinator logic must not
        // take the whole receive loop down with it.
        let result =
            std::panic::AssertUnwindSafe(coordinator.handle_provisioning_event(event)).catch_unwind().await;
        if let Err(panic) = result {
            error!(?panic, "coordinator panicked while handling a provisioning event");
        }
    }
}

#[cfg(test)]
#[path = "receiver_tests.rs"]
mod tests;
