// SPDX-License-Identifier: MIT

//! Proptest strategies shared by downstream crates' property tests.
//! Only compiled behind the `test-support` feature, mirroring the
//! teacher's `oj-core::test_support` gating.

use proptest::prelude::*;

use crate::ids::VenueId;

/// Arbitrary non-empty venue id made of ASCII alphanumerics, the
/// shape real venue ids take upstream.
pub fn venue_id_strategy() -> impl Strategy<Value = VenueId> {
    "[a-zA-Z0-9]{1,16}".prop_map(VenueId::new)
}

/// Arbitrary serial string in MAC-address shape.
pub fn serial_string_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(0u8..=255, 6)
        .prop_map(|bytes| bytes.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(":"))
}
