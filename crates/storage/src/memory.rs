// SPDX-License-Identifier: MIT

//! In-memory store implementations, used by tests and by the demo
//! binary when no state directory is configured.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

use venue_core::{BoardId, BoardRecord};

use crate::{BoardsStore, StoreError, TimePointsStore};

#[derive(Default)]
pub struct InMemoryBoardsStore {
    records: Mutex<HashMap<BoardId, BoardRecord>>,
}

impl InMemoryBoardsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store directly (test convenience).
    pub fn seed(&self, record: BoardRecord) {
        self.records.lock().insert(record.id.clone(), record);
    }
}

#[async_trait]
impl BoardsStore for InMemoryBoardsStore {
    async fn get(&self, id: &BoardId) -> Result<Option<BoardRecord>, StoreError> {
        Ok(self.records.lock().get(id.as_str()).cloned())
    }

    async fn create(&self, record: &BoardRecord) -> Result<(), StoreError> {
        self.records.lock().insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &BoardRecord) -> Result<(), StoreError> {
        self.records.lock().insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, id: &BoardId) -> Result<(), StoreError> {
        self.records.lock().remove(id.as_str());
        Ok(())
    }

    async fn iterate(&self) -> Result<Vec<BoardRecord>, StoreError> {
        Ok(self.records.lock().values().cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryTimePointsStore {
    /// Board ids whose time points have been deleted; exposed for
    /// assertions in integration tests (S4: "external stores received
    /// delete calls for B1").
    deleted: Mutex<HashSet<BoardId>>,
}

impl InMemoryTimePointsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn was_deleted(&self, id: &BoardId) -> bool {
        self.deleted.lock().contains(id)
    }
}

#[async_trait]
impl TimePointsStore for InMemoryTimePointsStore {
    async fn delete_board(&self, id: &BoardId) -> Result<(), StoreError> {
        self.deleted.lock().insert(id.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
