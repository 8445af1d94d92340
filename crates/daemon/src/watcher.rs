// SPDX-License-Identifier: MIT

//! A reference `Watcher` implementation, grounded in
//! `examples/original_source/src/VenueWatcher.cpp`'s register/diff/
//! deregister dance (`ModifySerialNumbers`'s symmetric difference).
//!
//! Spec.md §4.e treats the watcher's internals as external, but the
//! workspace needs a runnable default: `TelemetryWatcher` keeps a
//! per-serial `DeviceInfo` map and (de)registers serial sets against a
//! [`TelemetryRegistry`] — the collapsed stand-in for the three
//! telemetry receivers (state/status/health).

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;
use venue_core::{BoardId, DeviceInfo, MsgType, Serial, VenueId, Watcher};

/// Stands in for `StateReceiver`/`DeviceStatusReceiver`/`HealthReceiver`
/// (spec.md §6) collapsed to the register/deregister surface the core
/// needs. Unlike the original's receivers, this never hands back a
/// reference to the watcher itself — routing telemetry to a watcher is
/// the worker pool's job (it already holds the `Arc<dyn Watcher>`), so
/// the registry only needs to know which serials are live for a board.
pub trait TelemetryRegistry: Send + Sync {
    fn register(&self, board_id: &BoardId, serials: &[Serial]);
    fn deregister(&self, board_id: &BoardId, serials: &[Serial]);
}

/// Builds the concrete `Watcher` the coordinator installs for a board,
/// per spec.md §4.c step 2 (`Watcher::new(boardId, venueId, serials)`).
pub trait WatcherFactory: Send + Sync {
    fn create(&self, board_id: &BoardId, venue_id: &VenueId, serials: &[Serial]) -> Arc<dyn Watcher>;
}

pub struct TelemetryWatcherFactory<R> {
    registry: Arc<R>,
}

impl<R: TelemetryRegistry + 'static> TelemetryWatcherFactory<R> {
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }
}

impl<R: TelemetryRegistry + 'static> WatcherFactory for TelemetryWatcherFactory<R> {
    fn create(&self, board_id: &BoardId, venue_id: &VenueId, serials: &[Serial]) -> Arc<dyn Watcher> {
        Arc::new(TelemetryWatcher::new(board_id.clone(), venue_id.clone(), serials, Arc::clone(&self.registry)))
    }
}

struct Inner {
    devices: HashMap<Serial, DeviceInfo>,
    started: bool,
}

pub struct TelemetryWatcher<R> {
    board_id: BoardId,
    venue_id: VenueId,
    registry: Arc<R>,
    inner: Mutex<Inner>,
}

impl<R: TelemetryRegistry> TelemetryWatcher<R> {
    pub fn new(board_id: BoardId, venue_id: VenueId, serials: &[Serial], registry: Arc<R>) -> Self {
        let devices = serials.iter().map(|&s| (s, DeviceInfo::new(s, board_id.clone()))).collect();
        Self { board_id, venue_id, registry, inner: Mutex::new(Inner { devices, started: false }) }
    }
}

impl<R: TelemetryRegistry> Watcher for TelemetryWatcher<R> {
    fn start(&self) {
        let mut inner = self.inner.lock();
        if inner.started {
            return;
        }
        let serials: Vec<Serial> = inner.devices.keys().copied().collect();
        self.registry.register(&self.board_id, &serials);
        inner.started = true;
    }

    fn stop(&self) {
        let mut inner = self.inner.lock();
        if !inner.started {
            return;
        }
        let serials: Vec<Serial> = inner.devices.keys().copied().collect();
        self.registry.deregister(&self.board_id, &serials);
        inner.started = false;
    }

    fn modify_serial_numbers(&self, serials: &[Serial]) {
        let mut inner = self.inner.lock();
        let new_set: BTreeSet<Serial> = serials.iter().copied().collect();
        let old_set: BTreeSet<Serial> = inner.devices.keys().copied().collect();

        let added: Vec<Serial> = new_set.difference(&old_set).copied().collect();
        let removed: Vec<Serial> = old_set.difference(&new_set).copied().collect();

        if inner.started {
            if !removed.is_empty() {
                self.registry.deregister(&self.board_id, &removed);
            }
            if !added.is_empty() {
                self.registry.register(&self.board_id, &added);
            }
        }

        for serial in &removed {
            inner.devices.remove(serial);
        }
        for &serial in &added {
            inner.devices.insert(serial, DeviceInfo::new(serial, self.board_id.clone()));
        }
    }

    fn process(&self, serial: Serial, msg_type: MsgType, payload: &serde_json::Value) {
        let mut inner = self.inner.lock();
        let Some(device) = inner.devices.get_mut(&serial) else {
            return;
        };
        match msg_type {
            MsgType::Connection => {
                if let Some(connected) = payload.get("connected").and_then(|v| v.as_bool()) {
                    device.connected = connected;
                }
            }
            MsgType::State => device.last_state = Some(payload.clone()),
            MsgType::Health => device.last_health = Some(payload.clone()),
        }
    }

    fn venue(&self) -> VenueId {
        self.venue_id.clone()
    }

    fn get_devices(&self) -> Vec<DeviceInfo> {
        self.inner.lock().devices.values().cloned().collect()
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
