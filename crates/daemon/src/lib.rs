// SPDX-License-Identifier: MIT

//! The venue analytics coordinator daemon: binds the coordinator,
//! event receiver, and worker pool into one runnable service.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;
mod coordinator;
mod lifecycle;
mod receiver;
mod watcher;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, DaemonConfig};
pub use coordinator::Coordinator;
pub use lifecycle::Daemon;
pub use receiver::{EventReceiver, ProvisioningBus};
pub use watcher::{TelemetryRegistry, TelemetryWatcher, TelemetryWatcherFactory, WatcherFactory};

pub use venue_core::{BoardId, BoardRecord, DeviceInfo, MsgType, ProvisioningEvent, Serial, VenueId, Watcher};
pub use venue_pool::{PoolConfig, WorkerPool};
pub use venue_provisioning::{ProvisioningSdk, SdkError};
pub use venue_storage::{BoardsStore, StoreError, TimePointsStore};
