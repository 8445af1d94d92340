// SPDX-License-Identifier: MIT

//! Device serial normalization and the shared FNV-1a hash.
//!
//! Grounded in `VenueCoordinator::GetDevicesForBoard`'s call to
//! `Utils::SerialNumberToInt` and `VenueWorkerPool::ShardIndex` in
//! `examples/original_source/src/VenueWorkerPool.cpp`.

use serde::{Deserialize, Serialize};

/// FNV-1a 64-bit offset basis and prime, per spec.md §4.d.
const FNV_OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;
const FNV_PRIME: u64 = 1_099_511_628_211;

/// Deterministic 64-bit FNV-1a hash over raw bytes.
///
/// Used both as the worker-pool shard function (over a venue id) and
/// as the normalization fallback for a device-serial string that is
/// not validly hex (see [`Serial::normalize`]).
pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// A normalized device identifier.
///
/// On the wire, serials arrive as MAC-like strings
/// (`"00:11:22:33:44:55"`); internally the core only ever stores the
/// `u64` form, sorted ascending and deduplicated (I2/P4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Serial(pub u64);

impl Serial {
    /// Normalize a wire-format serial string into its canonical `u64` form.
    ///
    /// Strips `:` and `-` separators, then parses the remaining digits
    /// as hex. A string that isn't valid hex after stripping separators
    /// never panics the parser (the original C++ `std::stoull` would
    /// throw on garbage input and that throw is not caught at this
    /// call site) — instead it falls back to hashing the raw string,
    /// which keeps normalization infallible everywhere the event
    /// parser needs it, and is a documented deviation (see DESIGN.md).
    pub fn normalize(raw: &str) -> Self {
        let cleaned: String = raw.chars().filter(|c| *c != ':' && *c != '-').collect();
        match u64::from_str_radix(&cleaned, 16) {
            Ok(value) => Serial(value),
            Err(_) => Serial(fnv1a_64(raw.as_bytes())),
        }
    }

    /// Normalize and return the sorted, deduplicated set for a list of
    /// wire-format serial strings (the normalizer spec.md §3 requires
    /// before a device list is applied).
    pub fn normalize_sorted_unique(raw: &[String]) -> Vec<Serial> {
        let mut serials: Vec<Serial> = raw.iter().map(|s| Serial::normalize(s)).collect();
        serials.sort_unstable();
        serials.dedup();
        serials
    }
}

impl std::fmt::Display for Serial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:012x}", self.0)
    }
}

#[cfg(test)]
#[path = "serial_tests.rs"]
mod tests;
