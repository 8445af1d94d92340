// SPDX-License-Identifier: MIT

//! The sharded worker pool, spec.md §4.d.
//!
//! A fixed set of workers, each with its own bounded queue. A
//! watcher's venue id picks its shard deterministically (I5), so every
//! message for a venue lands on the same worker and is processed in
//! the order it was accepted (P6). `enqueue` never blocks: a full
//! queue is a caller-side drop (P7), matching the original
//! `VenueWorkerPool::Enqueue` in
//! `examples/original_source/src/VenueWorkerPool.cpp`.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;

pub use config::PoolConfig;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

use venue_core::{fnv1a_64, MsgType, Serial, Watcher};

struct DispatchMessage {
    watcher: Arc<dyn Watcher>,
    serial: Serial,
    msg_type: MsgType,
    payload: serde_json::Value,
}

/// Deterministic shard index for a venue id (spec.md §4.d, P5).
pub fn shard_for(venue_id: &str, worker_count: usize) -> usize {
    if worker_count == 0 {
        return 0;
    }
    (fnv1a_64(venue_id.as_bytes()) % worker_count as u64) as usize
}

struct Worker {
    tx: mpsc::Sender<DispatchMessage>,
    rx: Mutex<Option<mpsc::Receiver<DispatchMessage>>>,
    /// Messages accepted but not yet finished processing -- the
    /// channel's own buffer only counts what's waiting, and tokio
    /// frees a permit on `recv()` rather than when the received value
    /// is dropped, so a message a worker is actively blocked on would
    /// otherwise not count against the bound (spec.md §8 S6). This
    /// tracks occupancy ourselves and gates `enqueue` on it instead of
    /// relying on `try_send`'s own backpressure.
    occupancy: Arc<AtomicUsize>,
    capacity: usize,
}

/// A fixed-size pool of workers delivering telemetry to watchers.
pub struct WorkerPool {
    workers: Vec<Worker>,
    running: AtomicBool,
    shutdown: CancellationToken,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
    pub fn new(config: PoolConfig) -> Self {
        let workers = (0..config.workers)
            .map(|_| {
                let (tx, rx) = mpsc::channel(config.queue_size);
                Worker {
                    tx,
                    rx: Mutex::new(Some(rx)),
                    occupancy: Arc::new(AtomicUsize::new(0)),
                    capacity: config.queue_size,
                }
            })
            .collect();
        Self {
            workers,
            running: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
            handles: Mutex::new(Vec::new()),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Spawn one task per worker. Idempotent: calling twice is a no-op.
    pub async fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        let mut handles = self.handles.lock().await;
        for (index, worker) in self.workers.iter().enumerate() {
            let mut rx = match worker.rx.lock().await.take() {
                Some(rx) => rx,
                None => continue,
            };
            let token = self.shutdown.clone();
            let occupancy = Arc::clone(&worker.occupancy);
            handles.push(tokio::spawn(async move {
                worker_loop(index, &mut rx, &token, &occupancy).await;
            }));
        }
    }

    /// Signal shutdown and join all worker tasks.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        self.shutdown.cancel();
        let mut handles = self.handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
    }

    /// Enqueue one telemetry notification for `watcher`'s shard.
    ///
    /// Returns `false` (without queuing anything) when the pool isn't
    /// running or the target shard is already at capacity — the
    /// caller is expected to drop the message and move on (P7).
    /// Capacity counts messages still waiting *and* the one a worker
    /// is currently blocked on inside `process` (spec.md §8 S6): the
    /// channel's own buffer alone would under-count by one, since
    /// tokio frees a send permit as soon as `recv()` takes the message
    /// off, not once the worker finishes with it.
    pub fn enqueue(
        &self,
        watcher: &Arc<dyn Watcher>,
        serial: Serial,
        msg_type: MsgType,
        payload: serde_json::Value,
    ) -> bool {
        if !self.running.load(Ordering::SeqCst) || self.workers.is_empty() {
            return false;
        }
        let venue = watcher.venue();
        let index = shard_for(venue.as_str(), self.workers.len());
        let worker = &self.workers[index];

        let mut occupied = worker.occupancy.load(Ordering::SeqCst);
        loop {
            if occupied >= worker.capacity {
                warn!(venue = %venue, shard = index, "worker queue full, dropping telemetry message");
                return false;
            }
            match worker.occupancy.compare_exchange_weak(
                occupied,
                occupied + 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => break,
                Err(observed) => occupied = observed,
            }
        }

        let message = DispatchMessage { watcher: Arc::clone(watcher), serial, msg_type, payload };
        match worker.tx.try_send(message) {
            Ok(()) => true,
            Err(_) => {
                worker.occupancy.fetch_sub(1, Ordering::SeqCst);
                warn!(venue = %venue, shard = index, "worker queue full, dropping telemetry message");
                false
            }
        }
    }
}

async fn worker_loop(
    index: usize,
    rx: &mut mpsc::Receiver<DispatchMessage>,
    shutdown: &CancellationToken,
    occupancy: &Arc<AtomicUsize>,
) {
    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                while let Ok(message) = rx.try_recv() {
                    dispatch(index, message, occupancy);
                }
                break;
            }
            message = rx.recv() => {
                match message {
                    Some(message) => dispatch(index, message, occupancy),
                    None => break,
                }
            }
        }
    }
}

fn dispatch(index: usize, message: DispatchMessage, occupancy: &AtomicUsize) {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        message.watcher.process(message.serial, message.msg_type, &message.payload);
    }));
    occupancy.fetch_sub(1, Ordering::SeqCst);
    if let Err(panic) = result {
        error!(worker = index, ?panic, "watcher panicked while processing telemetry");
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
