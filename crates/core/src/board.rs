// SPDX-License-Identifier: MIT

//! The persisted board record, as read from `BoardsStore`.

use serde::{Deserialize, Serialize};

use crate::ids::{BoardId, VenueId};

/// `venueList[0]` from spec.md §3 — the only venue binding that is
/// semantically meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueBinding {
    pub venue_id: VenueId,
    pub monitor_sub_venues: bool,
}

/// A board record as owned by the external board store.
///
/// `Ord`/`PartialOrd` are derived by `id` only (see `impl Ord` below)
/// so `BoardsToWatch` can be a `BTreeSet<BoardRecord>` ordered
/// deterministically by board id, matching the teacher's preference
/// for ordered collections over hash-order iteration when a scan
/// needs to be reproducible across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    pub id: BoardId,
    pub name: String,
    pub venue: Option<VenueBinding>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl BoardRecord {
    pub fn new(id: BoardId, name: String, venue: Option<VenueBinding>, now_ms: u64) -> Self {
        Self { id, name, venue, created_at: now_ms, updated_at: now_ms }
    }

    /// Venue id of `venue[0]`, or empty if the board has no venue
    /// binding (spec.md §4.c step 2: "or empty if none").
    pub fn venue_id(&self) -> VenueId {
        self.venue.as_ref().map(|v| v.venue_id.clone()).unwrap_or_default()
    }

    pub fn monitor_sub_venues(&self) -> bool {
        self.venue.as_ref().map(|v| v.monitor_sub_venues).unwrap_or(false)
    }
}

impl PartialOrd for BoardRecord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BoardRecord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
