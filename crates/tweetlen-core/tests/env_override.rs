//! Environment variable overrides.
//!
//! Kept in its own test binary so the process-wide variables cannot leak
//! into the config unit tests running in parallel.

#![allow(unsafe_code)]

use std::fs;
use std::sync::Mutex;

use camino::Utf8PathBuf;
use tempfile::TempDir;
use tweetlen_core::config::{ConfigLoader, LogLevel};

/// Serializes tests that mutate environment variables via `set_var`/`remove_var`.
static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn env_var_overrides_file_config() {
    let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("config.toml");
    fs::write(&config_path, "warning_threshold = 5\n").unwrap();
    let config_path = Utf8PathBuf::try_from(config_path).unwrap();

    // SAFETY: mutex serializes env access across tests in this binary.
    unsafe {
        std::env::set_var("TWEETLEN_WARNING_THRESHOLD", "40");
    }

    let result = ConfigLoader::new()
        .with_user_config(false)
        .with_file(&config_path)
        .load();

    // SAFETY: cleanup after test.
    unsafe {
        std::env::remove_var("TWEETLEN_WARNING_THRESHOLD");
    }

    let (config, _sources) = result.unwrap();
    assert_eq!(config.warning_threshold(), 40);
}

#[test]
fn env_var_sets_log_level() {
    let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    // SAFETY: mutex serializes env access across tests in this binary.
    unsafe {
        std::env::set_var("TWEETLEN_LOG_LEVEL", "warn");
    }

    let result = ConfigLoader::new()
        .with_user_config(false)
        .load();

    // SAFETY: cleanup after test.
    unsafe {
        std::env::remove_var("TWEETLEN_LOG_LEVEL");
    }

    let (config, _sources) = result.unwrap();
    assert_eq!(config.log_level, LogLevel::Warn);
}
