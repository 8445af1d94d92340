// SPDX-License-Identifier: MIT

use super::*;
use serial_test::serial;

fn clear_env() {
    std::env::remove_var(PoolConfig::ENV_WORKERS);
    std::env::remove_var(PoolConfig::ENV_QUEUE_SIZE);
}

#[test]
#[serial]
fn defaults_clamp_workers_to_at_least_two() {
    clear_env();
    let config = PoolConfig::from_env();
    assert!(config.workers >= MIN_WORKERS);
    assert_eq!(config.queue_size, 1024);
}

#[test]
#[serial]
fn workers_env_var_is_clamped_to_the_documented_range() {
    clear_env();
    std::env::set_var(PoolConfig::ENV_WORKERS, "1");
    assert_eq!(PoolConfig::from_env().workers, MIN_WORKERS);

    std::env::set_var(PoolConfig::ENV_WORKERS, "9999");
    assert_eq!(PoolConfig::from_env().workers, MAX_WORKERS);

    std::env::set_var(PoolConfig::ENV_WORKERS, "5");
    assert_eq!(PoolConfig::from_env().workers, 5);
    clear_env();
}

#[test]
#[serial]
fn queue_size_env_var_has_a_floor() {
    clear_env();
    std::env::set_var(PoolConfig::ENV_QUEUE_SIZE, "8");
    assert_eq!(PoolConfig::from_env().queue_size, MIN_QUEUE_SIZE);

    std::env::set_var(PoolConfig::ENV_QUEUE_SIZE, "2048");
    assert_eq!(PoolConfig::from_env().queue_size, 2048);
    clear_env();
}

#[test]
#[serial]
fn unparsable_env_values_fall_back_to_defaults() {
    clear_env();
    std::env::set_var(PoolConfig::ENV_WORKERS, "not-a-number");
    let config = PoolConfig::from_env();
    assert!(config.workers >= MIN_WORKERS);
    clear_env();
}
