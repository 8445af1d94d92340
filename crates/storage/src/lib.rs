// SPDX-License-Identifier: MIT

//! `BoardsStore` / `TimePointsStore`: the two persisted tables the
//! coordinator reads from and writes to (spec.md §6).
//!
//! The core only ever talks to these through the traits below; this
//! crate additionally ships a JSON-file-backed implementation so the
//! workspace is runnable end to end, and an in-memory implementation
//! for tests.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod file;
mod memory;

pub use file::FileBoardsStore;
pub use memory::{InMemoryBoardsStore, InMemoryTimePointsStore};

use async_trait::async_trait;
use thiserror::Error;
use venue_core::{BoardId, BoardRecord};

/// Errors from a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// The board table. Per spec.md §6: `GetRecord`, `CreateRecord`,
/// `UpdateRecord`, `DeleteRecord`, `Iterate`.
#[async_trait]
pub trait BoardsStore: Send + Sync {
    async fn get(&self, id: &BoardId) -> Result<Option<BoardRecord>, StoreError>;
    async fn create(&self, record: &BoardRecord) -> Result<(), StoreError>;
    async fn update(&self, record: &BoardRecord) -> Result<(), StoreError>;
    async fn delete(&self, id: &BoardId) -> Result<(), StoreError>;
    async fn iterate(&self) -> Result<Vec<BoardRecord>, StoreError>;
}

/// The time-points table. Per spec.md §6: `DeleteBoard` /
/// `DeleteRecords(filter)` — the core only ever needs the per-board
/// delete.
#[async_trait]
pub trait TimePointsStore: Send + Sync {
    async fn delete_board(&self, id: &BoardId) -> Result<(), StoreError>;
}
