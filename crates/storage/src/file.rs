// SPDX-License-Identifier: MIT

//! A JSON-file-backed `BoardsStore`.
//!
//! One JSON array on disk, rewritten atomically (write to a sibling
//! temp file, then `rename`) on every mutation so a crash mid-write
//! never leaves a truncated file — the same write-then-rename shape
//! the teacher's daemon uses for its own on-disk state.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::warn;
use venue_core::{BoardId, BoardRecord};

use crate::{BoardsStore, StoreError};

pub struct FileBoardsStore {
    path: PathBuf,
    cache: Mutex<Vec<BoardRecord>>,
}

impl FileBoardsStore {
    /// Open (or create) the backing file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let cache = if path.exists() {
            let bytes = std::fs::read(&path)?;
            if bytes.is_empty() {
                Vec::new()
            } else {
                serde_json::from_slice(&bytes)?
            }
        } else {
            Vec::new()
        };
        Ok(Self { path, cache: Mutex::new(cache) })
    }

    fn persist(&self, records: &[BoardRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, bytes)?;
    match std::fs::rename(&tmp_path, path) {
        Ok(()) => Ok(()),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "failed to finalize atomic write");
            Err(e)
        }
    }
}

#[async_trait]
impl BoardsStore for FileBoardsStore {
    async fn get(&self, id: &BoardId) -> Result<Option<BoardRecord>, StoreError> {
        Ok(self.cache.lock().iter().find(|r| &r.id == id).cloned())
    }

    async fn create(&self, record: &BoardRecord) -> Result<(), StoreError> {
        let mut records = self.cache.lock();
        records.retain(|r| r.id != record.id);
        records.push(record.clone());
        self.persist(&records)
    }

    async fn update(&self, record: &BoardRecord) -> Result<(), StoreError> {
        self.create(record).await
    }

    async fn delete(&self, id: &BoardId) -> Result<(), StoreError> {
        let mut records = self.cache.lock();
        records.retain(|r| &r.id != id);
        self.persist(&records)
    }

    async fn iterate(&self) -> Result<Vec<BoardRecord>, StoreError> {
        Ok(self.cache.lock().clone())
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
