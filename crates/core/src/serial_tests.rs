// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn normalize_strips_colons() {
    assert_eq!(Serial::normalize("00:00:00:00:00:01"), Serial(0x1));
    assert_eq!(Serial::normalize("00:00:00:00:00:02"), Serial(0x2));
}

#[test]
fn normalize_strips_dashes() {
    assert_eq!(Serial::normalize("00-00-00-00-00-ff"), Serial(0xff));
}

#[test]
fn normalize_garbage_falls_back_to_hash_without_panicking() {
    let a = Serial::normalize("not-a-mac-zzzz");
    let b = Serial::normalize("not-a-mac-zzzz");
    assert_eq!(a, b, "fallback hash must be deterministic");
}

#[test]
fn normalize_sorted_unique_dedupes_and_sorts() {
    // S5 from spec.md: duplicate + unsorted devices normalize to a
    // sorted, deduped 2-element set.
    let raw = vec![
        "00:00:00:00:00:05".to_string(),
        "00:00:00:00:00:02".to_string(),
        "00:00:00:00:00:05".to_string(),
    ];
    let out = Serial::normalize_sorted_unique(&raw);
    assert_eq!(out, vec![Serial(0x2), Serial(0x5)]);
}

#[test]
fn fnv1a_is_stable_across_calls() {
    let h1 = fnv1a_64(b"venue-1");
    let h2 = fnv1a_64(b"venue-1");
    assert_eq!(h1, h2);
    assert_ne!(h1, fnv1a_64(b"venue-2"));
}

#[test]
fn serial_display_is_lowercase_hex() {
    assert_eq!(Serial(0xabc).to_string(), "000000000abc");
}
