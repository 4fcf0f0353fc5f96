//! Config file scenarios

use lockwise::{run_counter, CounterMode, Error, HarnessConfig, CONFIG_FILE_NAME};
use std::fs;
use tempfile::TempDir;

#[test]
fn config_file_drives_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "[counter]\nworkers = 4\niterations = 25\ndelay_us = 0\n").unwrap();

    let config = HarnessConfig::from_file(&path).unwrap();
    let report = run_counter(&config.counter, CounterMode::Guarded).unwrap();

    assert_eq!(report.expected, 100);
    assert_eq!(report.actual, 100);
    assert_eq!(config.bank, HarnessConfig::default().bank);
}

#[test]
fn default_toml_round_trips_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, HarnessConfig::default_toml()).unwrap();

    assert_eq!(
        HarnessConfig::from_file(&path).unwrap(),
        HarnessConfig::default()
    );
}

#[test]
fn invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "[pipeline]\nconsumers = 9\n").unwrap();

    assert!(matches!(
        HarnessConfig::from_file(&path),
        Err(Error::InvalidConfig(_))
    ));
}
