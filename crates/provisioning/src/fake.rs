// SPDX-License-Identifier: MIT

//! An in-memory `ProvisioningSdk` for tests and the demo binary.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use venue_core::VenueId;

use crate::{ProvisioningSdk, SdkError};

#[derive(Default)]
pub struct FakeProvisioningSdk {
    venues: Mutex<HashMap<VenueId, Vec<String>>>,
}

impl FakeProvisioningSdk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a venue with its current device list (test setup).
    pub fn set_devices(&self, venue: VenueId, devices: Vec<String>) {
        self.venues.lock().insert(venue, devices);
    }

    /// Remove a venue, simulating it disappearing upstream.
    pub fn remove_venue(&self, venue: &VenueId) {
        self.venues.lock().remove(venue);
    }
}

#[async_trait]
impl ProvisioningSdk for FakeProvisioningSdk {
    async fn venue_exists(&self, venue: &VenueId) -> Result<bool, SdkError> {
        Ok(self.venues.lock().contains_key(venue))
    }

    async fn venue_devices(
        &self,
        venue: &VenueId,
        _monitor_sub_venues: bool,
    ) -> Result<(Vec<String>, bool), SdkError> {
        let venues = self.venues.lock();
        match venues.get(venue) {
            Some(devices) => Ok((devices.clone(), true)),
            None => Ok((Vec::new(), false)),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
