// SPDX-License-Identifier: MIT

//! Decodes a provisioning-change payload into a typed
//! [`venue_core::ProvisioningEvent`].
//!
//! This is a hand-rolled decode rather than a `Deserialize` derive
//! because the wire format tolerates malformed fields that a strict
//! derive would reject outright (spec.md §4.a): a non-numeric
//! `version` degrades to `0` instead of failing the whole event, and a
//! non-array `devices` degrades to an empty list instead of failing.
//! Grounded in `examples/original_source/src/ProvisioningChangeEvent.h`'s
//! `ParseProvisioningChangeEvent`.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use serde_json::Value;
use thiserror::Error;
use venue_core::{BoardId, EventType, ProvisioningEvent, ProvisioningEventBoard, VenueId};

/// Failure modes for [`parse_provisioning_event`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// The outer payload was not valid JSON at all.
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The payload parsed as JSON but decoded to an event that fails
    /// `ProvisioningEvent::is_valid` (empty `eventType` or `board.id`).
    #[error("invalid event: missing eventType or board.id")]
    Invalid,
}

fn str_field(obj: &Value, key: &str) -> String {
    obj.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn bool_field(obj: &Value, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Reads `version` leniently: present-but-unreadable degrades to `0`
/// rather than failing the parse (spec.md §4.a).
fn version_field(obj: &Value) -> u64 {
    match obj.get("version") {
        None => 0,
        Some(v) => v.as_u64().unwrap_or(0),
    }
}

/// Reads `devices` leniently: present-but-not-an-array degrades to an
/// empty list rather than failing the parse (spec.md §4.a).
fn devices_field(obj: &Value) -> Vec<String> {
    match obj.get("devices") {
        Some(Value::Array(items)) => {
            items.iter().filter_map(Value::as_str).map(str::to_string).collect()
        }
        _ => Vec::new(),
    }
}

/// Parse a provisioning-change payload.
///
/// Returns `Ok` only when the decoded event is valid per
/// `ProvisioningEvent::is_valid`; any JSON syntax error in the outer
/// payload is reported as [`ParseError::Malformed`], matching the
/// `catch (...)` around `nlohmann::json::parse` in the original.
pub fn parse_provisioning_event(payload: &[u8]) -> Result<ProvisioningEvent, ParseError> {
    let root: Value = serde_json::from_slice(payload)?;

    let board_value = root.get("board").cloned().unwrap_or(Value::Null);
    let board = ProvisioningEventBoard {
        id: BoardId::new(str_field(&board_value, "id")),
        name: str_field(&board_value, "name"),
        venue_id: VenueId::new(str_field(&board_value, "venueId")),
        monitor_sub_venues: bool_field(&board_value, "monitorSubVenues"),
        version: version_field(&board_value),
        devices: devices_field(&board_value),
    };

    let event = ProvisioningEvent {
        event_id: str_field(&root, "eventId"),
        event_type: EventType::from(str_field(&root, "eventType").as_str()),
        occurred_at: str_field(&root, "occurredAt"),
        correlation_id: str_field(&root, "correlationId"),
        board,
    };

    if event.is_valid() {
        Ok(event)
    } else {
        Err(ParseError::Invalid)
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
