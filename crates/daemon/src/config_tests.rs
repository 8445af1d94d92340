// SPDX-License-Identifier: MIT

use super::*;
use serial_test::serial;

fn clear_env() {
    std::env::remove_var("VENUE_STATE_DIR");
    std::env::remove_var("XDG_STATE_HOME");
}

#[test]
#[serial]
fn venue_state_dir_takes_priority() {
    clear_env();
    std::env::set_var("VENUE_STATE_DIR", "/tmp/venue-explicit");
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg-ignored");
    assert_eq!(state_dir().unwrap(), PathBuf::from("/tmp/venue-explicit"));
    clear_env();
}

#[test]
#[serial]
fn falls_back_to_xdg_state_home() {
    clear_env();
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg-state");
    assert_eq!(state_dir().unwrap(), PathBuf::from("/tmp/xdg-state/venue-analytics"));
    clear_env();
}

#[test]
#[serial]
fn falls_back_to_home_local_state() {
    clear_env();
    let home = std::env::var("HOME").expect("HOME must be set for this test to be meaningful");
    assert_eq!(state_dir().unwrap(), PathBuf::from(home).join(".local/state/venue-analytics"));
}

#[test]
#[serial]
fn load_derives_board_and_time_points_paths_under_state_dir() {
    clear_env();
    std::env::set_var("VENUE_STATE_DIR", "/tmp/venue-explicit");
    let config = DaemonConfig::load().unwrap();
    assert_eq!(config.boards_path, PathBuf::from("/tmp/venue-explicit/boards.json"));
    assert_eq!(config.time_points_path, PathBuf::from("/tmp/venue-explicit/time_points.json"));
    clear_env();
}
