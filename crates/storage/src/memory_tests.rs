// SPDX-License-Identifier: MIT

use super::*;

fn record(id: &str) -> BoardRecord {
    BoardRecord::new(BoardId::new(id), "Lobby".to_string(), None, 1)
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let store = InMemoryBoardsStore::new();
    store.create(&record("B1")).await.unwrap();
    let fetched = store.get(&BoardId::new("B1")).await.unwrap();
    assert_eq!(fetched.unwrap().id, BoardId::new("B1"));
}

#[tokio::test]
async fn delete_removes_record() {
    let store = InMemoryBoardsStore::new();
    store.create(&record("B1")).await.unwrap();
    store.delete(&BoardId::new("B1")).await.unwrap();
    assert!(store.get(&BoardId::new("B1")).await.unwrap().is_none());
}

#[tokio::test]
async fn iterate_returns_all_records() {
    let store = InMemoryBoardsStore::new();
    store.create(&record("B1")).await.unwrap();
    store.create(&record("B2")).await.unwrap();
    let mut all = store.iterate().await.unwrap();
    all.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn time_points_store_tracks_deletions() {
    let store = InMemoryTimePointsStore::new();
    let id = BoardId::new("B1");
    assert!(!store.was_deleted(&id));
    store.delete_board(&id).await.unwrap();
    assert!(store.was_deleted(&id));
}
