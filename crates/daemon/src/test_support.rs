// SPDX-License-Identifier: MIT

//! Shared test doubles for the coordinator and receiver suites: a
//! `Watcher` that records every call instead of doing anything, and a
//! `WatcherFactory` that hands those out and lets a test inspect them
//! after the fact.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use venue_core::{BoardId, DeviceInfo, MsgType, Serial, VenueId, Watcher};

use crate::watcher::WatcherFactory;

#[derive(Debug, Clone, PartialEq)]
pub enum WatcherCall {
    Start,
    Stop,
    ModifySerialNumbers(Vec<Serial>),
    Process(Serial, MsgType),
}

pub struct RecordingWatcher {
    pub board_id: BoardId,
    pub venue_id: VenueId,
    calls: StdMutex<Vec<WatcherCall>>,
    devices: StdMutex<HashMap<Serial, DeviceInfo>>,
}

impl RecordingWatcher {
    pub fn new(board_id: BoardId, venue_id: VenueId, serials: &[Serial]) -> Self {
        let devices = serials.iter().map(|&s| (s, DeviceInfo::new(s, board_id.clone()))).collect();
        Self { board_id, venue_id, calls: StdMutex::new(Vec::new()), devices: StdMutex::new(devices) }
    }

    pub fn calls(&self) -> Vec<WatcherCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_stopped(&self) -> bool {
        self.calls.lock().unwrap().iter().any(|c| *c == WatcherCall::Stop)
    }
}

impl Watcher for RecordingWatcher {
    fn start(&self) {
        self.calls.lock().unwrap().push(WatcherCall::Start);
    }

    fn stop(&self) {
        self.calls.lock().unwrap().push(WatcherCall::Stop);
    }

    fn modify_serial_numbers(&self, serials: &[Serial]) {
        self.calls.lock().unwrap().push(WatcherCall::ModifySerialNumbers(serials.to_vec()));
        let mut devices = self.devices.lock().unwrap();
        devices.retain(|serial, _| serials.contains(serial));
        for &serial in serials {
            devices.entry(serial).or_insert_with(|| DeviceInfo::new(serial, self.board_id.clone()));
        }
    }

    fn process(&self, serial: Serial, msg_type: MsgType, _payload: &serde_json::Value) {
        self.calls.lock().unwrap().push(WatcherCall::Process(serial, msg_type));
    }

    fn venue(&self) -> VenueId {
        self.venue_id.clone()
    }

    fn get_devices(&self) -> Vec<DeviceInfo> {
        self.devices.lock().unwrap().values().cloned().collect()
    }
}

/// Hands out `RecordingWatcher`s and keeps every one of them reachable
/// by board id so a test can inspect calls after the coordinator has
/// moved on.
#[derive(Default)]
pub struct RecordingFactory {
    created: StdMutex<HashMap<BoardId, Arc<RecordingWatcher>>>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, board_id: &BoardId) -> Option<Arc<RecordingWatcher>> {
        self.created.lock().unwrap().get(board_id).cloned()
    }

    pub fn created_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

impl WatcherFactory for RecordingFactory {
    fn create(&self, board_id: &BoardId, venue_id: &VenueId, serials: &[Serial]) -> Arc<dyn Watcher> {
        let watcher = Arc::new(RecordingWatcher::new(board_id.clone(), venue_id.clone(), serials));
        self.created.lock().unwrap().insert(board_id.clone(), Arc::clone(&watcher));
        watcher
    }
}
