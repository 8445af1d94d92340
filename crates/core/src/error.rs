// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors that can surface from core data-model operations.
///
/// Kept intentionally small: per spec.md §7, no error is meant to
/// surface out of the coordinator core at large, so this type exists
/// only for the handful of core-level operations (today: none produce
/// one) that may grow fallible constructors later.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("empty board id")]
    EmptyBoardId,
}
