// SPDX-License-Identifier: MIT

//! The upstream provisioning SDK the coordinator queries for live
//! venue/device state, per spec.md §6: `Venue.Exists`,
//! `Venue.GetDevices`.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod fake;

pub use fake::FakeProvisioningSdk;

use async_trait::async_trait;
use thiserror::Error;
use venue_core::VenueId;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("provisioning sdk unavailable: {0}")]
    Unavailable(String),
}

/// The subset of the provisioning SDK the coordinator depends on.
#[async_trait]
pub trait ProvisioningSdk: Send + Sync {
    async fn venue_exists(&self, venue: &VenueId) -> Result<bool, SdkError>;

    /// Returns `(device_serials, venue_exists)`, matching the original
    /// `Venue::GetDevices` out-parameter shape (spec.md §6) — the
    /// coordinator needs `venue_exists` even on a successful call to
    /// decide whether to retire a board whose venue just disappeared.
    async fn venue_devices(
        &self,
        venue: &VenueId,
        monitor_sub_venues: bool,
    ) -> Result<(Vec<String>, bool), SdkError>;
}
