// SPDX-License-Identifier: MIT

//! The telemetry message tag and the per-device info a watcher
//! accumulates. Modeled as a plain tagged enum — spec.md §9 notes no
//! inheritance/polymorphism is needed here.

use serde::{Deserialize, Serialize};

use crate::ids::BoardId;
use crate::serial::Serial;

/// Telemetry message kind, per spec.md §4.d.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MsgType {
    Connection,
    State,
    Health,
}

/// Snapshot of what a watcher knows about one device, returned by
/// `Coordinator::get_devices` / `Watcher::get_devices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub serial: Serial,
    pub board_id: BoardId,
    pub connected: bool,
    pub last_state: Option<serde_json::Value>,
    pub last_health: Option<serde_json::Value>,
}

impl DeviceInfo {
    pub fn new(serial: Serial, board_id: BoardId) -> Self {
        Self { serial, board_id, connected: false, last_state: None, last_health: None }
    }
}
