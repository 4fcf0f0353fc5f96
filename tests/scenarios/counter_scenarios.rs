//! Counter scenarios

use crate::common::*;
use lockwise::{run_counter, CounterConfig, CounterMode};

#[test]
fn guarded_counter_always_reaches_expected() {
    let config = reference_counter();
    for _ in 0..20 {
        let report = run_counter(&config, CounterMode::Guarded).unwrap();
        assert_eq!(report.expected, 300);
        assert_eq!(report.actual, 300);
        assert!(report.is_consistent());
    }
}

#[test]
fn unguarded_counter_never_overcounts() {
    let config = reference_counter();
    for _ in 0..5 {
        let report = run_counter(&config, CounterMode::Unguarded).unwrap();
        assert!(report.actual <= report.expected);
        assert!(report.actual >= 1);
        assert_eq!(report.lost_updates(), report.expected - report.actual);
    }
}

#[test]
fn unguarded_counter_loses_updates_eventually() {
    let config = CounterConfig {
        delay_us: 100,
        ..reference_counter()
    };
    let lost = (0..20).any(|_| {
        let report = run_counter(&config, CounterMode::Unguarded).unwrap();
        !report.is_consistent()
    });
    assert!(lost, "no lost update observed across 20 unguarded runs");
}

#[test]
fn single_worker_is_consistent_either_way() {
    let config = CounterConfig {
        workers: 1,
        iterations: 50,
        delay_us: 0,
    };
    for mode in [CounterMode::Guarded, CounterMode::Unguarded] {
        let report = run_counter(&config, mode).unwrap();
        assert_eq!(report.actual, 50);
    }
}
