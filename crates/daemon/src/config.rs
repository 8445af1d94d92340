// SPDX-License-Identifier: MIT

//! Daemon-level configuration: where persisted state lives on disk.
//!
//! Env-var resolution follows `oj-daemon/src/env.rs`'s style:
//! `VENUE_STATE_DIR` > `XDG_STATE_HOME`/venue-analytics >
//! `~/.local/state/venue-analytics` (spec.md §6).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a state directory: set VENUE_STATE_DIR or HOME")]
    NoStateDir,
}

/// Resolve the root directory the daemon persists its JSON-backed
/// stores under.
pub fn state_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(dir) = std::env::var("VENUE_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("venue-analytics"));
    }
    let home = std::env::var("HOME").map_err(|_| ConfigError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/venue-analytics"))
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub state_dir: PathBuf,
    pub boards_path: PathBuf,
    pub time_points_path: PathBuf,
}

impl DaemonConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let state_dir = state_dir()?;
        Ok(Self {
            boards_path: state_dir.join("boards.json"),
            time_points_path: state_dir.join("time_points.json"),
            state_dir,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
