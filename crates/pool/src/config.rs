// SPDX-License-Identifier: MIT

//! Worker-pool configuration, per spec.md §6:
//! `openwifi.analytics.workers` / `openwifi.analytics.queue.size`.
//!
//! Env-var resolution follows the style of `oj-daemon/src/env.rs`:
//! a small free function per setting, parsed leniently, falling back
//! to the documented default on anything unparsable.

const MIN_WORKERS: usize = 2;
const MAX_WORKERS: usize = 128;
const MIN_QUEUE_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub workers: usize,
    pub queue_size: usize,
}

impl PoolConfig {
    pub const ENV_WORKERS: &'static str = "VENUE_ANALYTICS_WORKERS";
    pub const ENV_QUEUE_SIZE: &'static str = "VENUE_ANALYTICS_QUEUE_SIZE";

    /// Read from the environment, clamping to the bounds spec.md §6
    /// requires. Default worker count is `max(2, available_parallelism)`.
    pub fn from_env() -> Self {
        let default_workers = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1).max(MIN_WORKERS);

        let workers = std::env::var(Self::ENV_WORKERS)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(default_workers)
            .clamp(MIN_WORKERS, MAX_WORKERS);

        let queue_size =
            std::env::var(Self::ENV_QUEUE_SIZE).ok().and_then(|s| s.parse::<usize>().ok()).unwrap_or(1024);
        let queue_size = queue_size.max(MIN_QUEUE_SIZE);

        Self { workers, queue_size }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
