// SPDX-License-Identifier: MIT

//! The provisioning change event, per spec.md §3 and §6.
//!
//! `Deserialize`/`Serialize` here round-trip an already-valid event;
//! the lenient, failure-tolerant decode described in spec.md §4.a
//! (version coercion, non-array `devices`, outer malformed payload)
//! lives in `venue-wire`, which builds one of these by hand from a
//! `serde_json::Value` instead of deriving straight off the wire.

use serde::{Deserialize, Serialize};

use crate::ids::{BoardId, VenueId};

/// `eventType` from the wire event. Unknown values are preserved
/// rather than coerced, because spec.md §6 says "unknown eventType
/// values are treated as non-delete" at *dispatch* time, not at parse
/// time -- the distinction matters if a future dispatch rule wants to
/// tell "updated" apart from "some new type we don't know yet".
///
/// Serializes/deserializes as the bare `eventType` string rather than
/// an externally-tagged enum, since `Unknown` must round-trip
/// arbitrary strings that a derived tagged enum can't represent
/// alongside named variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    Created,
    Updated,
    Deleted,
    Unknown(String),
}

impl EventType {
    pub fn is_delete(&self) -> bool {
        matches!(self, EventType::Deleted)
    }

    pub fn is_empty_tag(&self) -> bool {
        matches!(self, EventType::Unknown(s) if s.is_empty())
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventType::Created => "board.created",
            EventType::Updated => "board.updated",
            EventType::Deleted => "board.deleted",
            EventType::Unknown(s) => s.as_str(),
        }
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        match s {
            "board.created" => EventType::Created,
            "board.updated" => EventType::Updated,
            "board.deleted" => EventType::Deleted,
            other => EventType::Unknown(other.to_string()),
        }
    }
}

impl Serialize for EventType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(EventType::from(s.as_str()))
    }
}

/// The `board` payload nested in a provisioning change event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningEventBoard {
    pub id: BoardId,
    pub name: String,
    pub venue_id: VenueId,
    pub monitor_sub_venues: bool,
    /// `0` means "unversioned"; see spec.md §4.c step 1.
    pub version: u64,
    pub devices: Vec<String>,
}

impl Default for ProvisioningEventBoard {
    fn default() -> Self {
        Self {
            id: BoardId::default(),
            name: String::new(),
            venue_id: VenueId::default(),
            monitor_sub_venues: false,
            version: 0,
            devices: Vec::new(),
        }
    }
}

/// A parsed, typed provisioning change event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningEvent {
    pub event_id: String,
    pub event_type: EventType,
    /// Preserved for logging only; spec.md §9 notes the upstream
    /// source never actually uses it either.
    pub occurred_at: String,
    pub correlation_id: String,
    pub board: ProvisioningEventBoard,
}

impl ProvisioningEvent {
    /// Per spec.md §3: `eventType` non-empty AND `board.id` non-empty.
    pub fn is_valid(&self) -> bool {
        !self.event_type.is_empty_tag() && !self.event_type.as_str().is_empty() && !self.board.id.is_empty()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
