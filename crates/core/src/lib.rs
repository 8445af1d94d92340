// SPDX-License-Identifier: MIT

//! Core data model for the venue analytics coordinator.
//!
//! Defines the identifiers, board records, provisioning events, and
//! device-serial normalization shared by every other crate in the
//! workspace. Nothing here talks to the network, a store, or a clock;
//! it is the vocabulary the coordinator and worker pool share.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod board;
mod device;
mod error;
mod event;
mod ids;
mod serial;
mod watcher;

pub use board::{BoardRecord, VenueBinding};
pub use device::{DeviceInfo, MsgType};
pub use error::CoreError;
pub use event::{EventType, ProvisioningEvent, ProvisioningEventBoard};
pub use ids::{BoardId, VenueId};
pub use serial::{fnv1a_64, Serial};
pub use watcher::Watcher;

#[cfg(feature = "test-support")]
pub mod test_support;
