// SPDX-License-Identifier: MIT

//! The coordinator state machine, spec.md §4.c: owns the
//! `boardId → Watcher` map, the versioned device lists, and the two
//! periodic convergence loops. `ApplyDeviceUpdate` is the single
//! convergence primitive every other operation routes through.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex as SyncMutex;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use venue_core::{BoardId, BoardRecord, DeviceInfo, ProvisioningEvent, Serial, VenueBinding, VenueId, Watcher};
use venue_provisioning::ProvisioningSdk;
use venue_storage::{BoardsStore, TimePointsStore};

use crate::watcher::WatcherFactory;

const SLOW_POLL_INTERVAL: Duration = Duration::from_secs(60);
const RECONCILE_INTERVAL: Duration = Duration::from_secs(180);

struct CoordinatorState {
    watchers: HashMap<BoardId, Arc<dyn Watcher>>,
    existing_boards: HashMap<BoardId, Vec<Serial>>,
    existing_versions: HashMap<BoardId, u64>,
    boards_to_watch: BTreeSet<BoardRecord>,
}

impl Default for CoordinatorState {
    fn default() -> Self {
        Self {
            watchers: HashMap::new(),
            existing_boards: HashMap::new(),
            existing_versions: HashMap::new(),
            boards_to_watch: BTreeSet::new(),
        }
    }
}

/// The convergence engine, spec.md §4.c. Every public method returns
/// `()` — per §7, no error surfaces out of the core; failures are
/// logged and the next periodic pass retries.
pub struct Coordinator {
    state: SyncMutex<CoordinatorState>,
    boards_store: Arc<dyn BoardsStore>,
    time_points_store: Arc<dyn TimePointsStore>,
    provisioning_sdk: Arc<dyn ProvisioningSdk>,
    watcher_factory: Arc<dyn WatcherFactory>,
    running: AtomicBool,
    shutdown: CancellationToken,
    tasks: AsyncMutex<Vec<JoinHandle<()>>>,
}

impl Coordinator {
    pub fn new(
        boards_store: Arc<dyn BoardsStore>,
        time_points_store: Arc<dyn TimePointsStore>,
        provisioning_sdk: Arc<dyn ProvisioningSdk>,
        watcher_factory: Arc<dyn WatcherFactory>,
    ) -> Self {
        Self {
            state: SyncMutex::new(CoordinatorState::default()),
            boards_store,
            time_points_store,
            provisioning_sdk,
            watcher_factory,
            running: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
            tasks: AsyncMutex::new(Vec::new()),
        }
    }

    /// Load `BoardsToWatch` from the store and start the slow-poll and
    /// reconciliation loops. Idempotent.
    pub async fn start(self: &Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }

        match self.boards_store.iterate().await {
            Ok(records) => self.state.lock().boards_to_watch = records.into_iter().collect(),
            Err(e) => error!(error = %e, "failed to load boards from store at startup"),
        }

        let mut tasks = self.tasks.lock().await;

        let slow_poll_self = Arc::clone(self);
        let slow_poll_token = self.shutdown.clone();
        tasks.push(tokio::spawn(async move { slow_poll_self.slow_poll_loop(slow_poll_token).await }));

        let reconcile_self = Arc::clone(self);
        let reconcile_token = self.shutdown.clone();
        tasks.push(tokio::spawn(async move { reconcile_self.reconcile_loop(reconcile_token).await }));

        info!("coordinator started");
    }

    /// Signal shutdown and join both periodic loops. Idempotent.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        self.shutdown.cancel();
        let mut tasks = self.tasks.lock().await;
        for task in tasks.drain(..) {
            let _ = task.await;
        }
        info!("coordinator stopped");
    }

    pub async fn add_board(&self, id: &BoardId) {
        match self.boards_store.get(id).await {
            Ok(Some(record)) => {
                self.state.lock().boards_to_watch.insert(record);
            }
            Ok(None) => debug!(board_id = %id, "add_board: no such board in the store"),
            Err(e) => error!(board_id = %id, error = %e, "add_board: store lookup failed"),
        }
    }

    pub async fn update_board(&self, id: &BoardId) {
        let record = match self.boards_store.get(id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(board_id = %id, "update_board: no such board in the store");
                return;
            }
            Err(e) => {
                error!(board_id = %id, error = %e, "update_board: store lookup failed");
                return;
            }
        };

        let venue_id = record.venue_id();
        match self.provisioning_sdk.venue_devices(&venue_id, record.monitor_sub_venues()).await {
            Ok((devices, venue_exists)) => {
                if !venue_exists {
                    self.retire_board(id).await;
                    return;
                }
                let version = self.state.lock().existing_versions.get(id).copied().unwrap_or(0);
                let serials = Serial::normalize_sorted_unique(&devices);
                self.apply_device_update(id, serials, version).await;
            }
            Err(e) => error!(board_id = %id, error = %e, "update_board: provisioning sdk query failed"),
        }
    }

    pub async fn stop_board(&self, id: &BoardId) {
        let watcher = {
            let mut state = self.state.lock();
            state.existing_boards.remove(id);
            state.existing_versions.remove(id);
            state.watchers.remove(id)
        };
        if let Some(watcher) = watcher {
            watcher.stop();
        }
    }

    pub async fn handle_provisioning_event(&self, event: ProvisioningEvent) {
        let board_id = event.board.id.clone();

        if event.event_type.is_delete() {
            self.stop_board(&board_id).await;
            if let Err(e) = self.boards_store.delete(&board_id).await {
                error!(board_id = %board_id, error = %e, "failed to delete board record");
            }
            if let Err(e) = self.time_points_store.delete_board(&board_id).await {
                error!(board_id = %board_id, error = %e, "failed to delete time points");
            }
            return;
        }

        match self.boards_store.get(&board_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                let venue = if event.board.venue_id.is_empty() {
                    None
                } else {
                    Some(VenueBinding {
                        venue_id: event.board.venue_id.clone(),
                        monitor_sub_venues: event.board.monitor_sub_venues,
                    })
                };
                let record = BoardRecord::new(board_id.clone(), event.board.name.clone(), venue, now_ms());
                if let Err(e) = self.boards_store.create(&record).await {
                    error!(board_id = %board_id, error = %e, "failed to persist synthesized board record");
                    return;
                }
            }
            Err(e) => {
                error!(board_id = %board_id, error = %e, "board store lookup failed while dispatching event");
                return;
            }
        }

        let serials = Serial::normalize_sorted_unique(&event.board.devices);
        self.apply_device_update(&board_id, serials, event.board.version).await;
    }

    pub async fn get_devices(&self, id: &BoardId) -> Vec<DeviceInfo> {
        let watcher = self.state.lock().watchers.get(id).cloned();
        match watcher {
            Some(watcher) => watcher.get_devices(),
            None => Vec::new(),
        }
    }

    pub fn watching(&self, id: &BoardId) -> bool {
        self.state.lock().existing_boards.contains_key(id)
    }

    /// Look up the watcher currently serving `id`, if any — used by
    /// external telemetry producers to obtain the handle they then
    /// pass to the worker pool's `enqueue`.
    pub fn watcher_for(&self, id: &BoardId) -> Option<Arc<dyn Watcher>> {
        self.state.lock().watchers.get(id).cloned()
    }

    async fn start_board_from_record(&self, record: &BoardRecord) {
        let venue_id = record.venue_id();
        match self.provisioning_sdk.venue_devices(&venue_id, record.monitor_sub_venues()).await {
            Ok((devices, venue_exists)) => {
                if !venue_exists {
                    return;
                }
                let serials = Serial::normalize_sorted_unique(&devices);
                self.apply_device_update(&record.id, serials, 0).await;
            }
            Err(e) => error!(board_id = %record.id, error = %e, "start_board_from_record: provisioning sdk query failed"),
        }
    }

    async fn retire_board(&self, id: &BoardId) {
        info!(board_id = %id, "retiring board: venue no longer exists upstream");
        self.stop_board(id).await;
        if let Err(e) = self.boards_store.delete(id).await {
            error!(board_id = %id, error = %e, "failed to delete retired board record");
        }
        if let Err(e) = self.time_points_store.delete_board(id).await {
            error!(board_id = %id, error = %e, "failed to delete retired board's time points");
        }
    }

    /// The convergence primitive, spec.md §4.c. `devices` must already
    /// be sorted and deduplicated (I2).
    async fn apply_device_update(&self, board_id: &BoardId, devices: Vec<Serial>, version: u64) {
        let (stale, watcher_existed, prior_devices) = {
            let state = self.state.lock();
            let cur = state.existing_versions.get(board_id).copied().unwrap_or(0);
            let stale = version != 0 && cur != 0 && version < cur;
            let watcher_existed = state.watchers.contains_key(board_id);
            let prior_devices = state.existing_boards.get(board_id).cloned();
            (stale, watcher_existed, prior_devices)
        };

        if stale {
            debug!(board_id = %board_id, version, "stale provisioning event, ignoring");
            return;
        }

        if !watcher_existed {
            if devices.is_empty() {
                let mut state = self.state.lock();
                state.existing_boards.remove(board_id);
                state.existing_versions.remove(board_id);
                return;
            }

            // The only I/O inside this otherwise synchronous critical
            // section (spec.md §5 sanctions exactly this lookup).
            let venue_id = match self.boards_store.get(board_id).await {
                Ok(Some(record)) => record.venue_id(),
                Ok(None) => VenueId::default(),
                Err(e) => {
                    error!(board_id = %board_id, error = %e, "board store lookup failed while starting a watcher");
                    VenueId::default()
                }
            };
            let watcher = self.watcher_factory.create(board_id, &venue_id, &devices);
            watcher.start();

            let mut state = self.state.lock();
            if state.watchers.contains_key(board_id) {
                // Lost a race with a concurrent caller while awaiting
                // the store lookup above; quiesce the loser.
                watcher.stop();
            } else {
                state.watchers.insert(board_id.clone(), watcher);
            }
        } else {
            let needs_modify = prior_devices.as_ref().map(|cur| cur != &devices).unwrap_or(true);
            if needs_modify {
                let watcher = self.state.lock().watchers.get(board_id).cloned();
                if let Some(watcher) = watcher {
                    watcher.modify_serial_numbers(&devices);
                }
            }
        }

        let mut state = self.state.lock();
        state.existing_boards.insert(board_id.clone(), devices);
        if version != 0 {
            state.existing_versions.insert(board_id.clone(), version);
        }
    }

    async fn slow_poll_loop(self: Arc<Self>, shutdown: CancellationToken) {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(SLOW_POLL_INTERVAL) => {}
            }
            if shutdown.is_cancelled() {
                break;
            }
            self.slow_poll_once().await;
        }
    }

    async fn slow_poll_once(&self) {
        let records = match self.boards_store.iterate().await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "slow poll: failed to iterate boards");
                return;
            }
        };
        self.state.lock().boards_to_watch = records.iter().cloned().collect();

        for record in &records {
            let watched = self.state.lock().watchers.contains_key(&record.id);
            if !watched {
                self.start_board_from_record(record).await;
                continue;
            }
            match self.provisioning_sdk.venue_exists(&record.venue_id()).await {
                Ok(true) => {}
                Ok(false) => self.retire_board(&record.id).await,
                Err(e) => error!(board_id = %record.id, error = %e, "slow poll: venue existence check failed"),
            }
        }
    }

    async fn reconcile_loop(self: Arc<Self>, shutdown: CancellationToken) {
        let mut ticker =
            tokio::time::interval_at(tokio::time::Instant::now() + RECONCILE_INTERVAL, RECONCILE_INTERVAL);
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => self.reconcile_once().await,
            }
        }
    }

    async fn reconcile_once(&self) {
        let board_ids: Vec<BoardId> = self.state.lock().watchers.keys().cloned().collect();
        for id in board_ids {
            self.update_board(&id).await;
        }
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap_or_default().as_millis() as u64
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
