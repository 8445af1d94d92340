// SPDX-License-Identifier: MIT

//! The watcher façade, spec.md §4.e.
//!
//! This is a contract, not an implementation: the core (coordinator +
//! worker pool) only ever calls through `dyn Watcher`. All methods
//! take `&self` — per spec.md, a watcher is responsible for its own
//! locking, so `modify_serial_numbers` must be safe to call
//! concurrently with `process`. Methods are synchronous because the
//! original façade's operations are in-memory bookkeeping plus
//! telemetry (de)registration, not I/O; a concrete watcher that needs
//! to await something internally can still spawn its own task.

use crate::device::{DeviceInfo, MsgType};
use crate::ids::VenueId;
use crate::serial::Serial;

pub trait Watcher: Send + Sync {
    /// Idempotent: safe to call on an already-started watcher.
    fn start(&self);
    /// Idempotent: safe to call on an already-stopped watcher.
    fn stop(&self);
    /// `serials` is sorted and deduplicated (I2) by the caller.
    fn modify_serial_numbers(&self, serials: &[Serial]);
    fn process(&self, serial: Serial, msg_type: MsgType, payload: &serde_json::Value);
    /// The venue id used as the worker-pool shard key (I5).
    fn venue(&self) -> VenueId;
    fn get_devices(&self) -> Vec<DeviceInfo>;
}
