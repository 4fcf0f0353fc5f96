//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use lockwise::{BankConfig, CounterConfig, DelayRange, HarnessConfig, PipelineConfig};

/// Default config with every pause shortened so runs take milliseconds.
pub fn fast_config() -> HarnessConfig {
    let mut config = HarnessConfig::default();
    config.counter.delay_us = 10;
    config.pipeline.produce_delay = DelayRange::new(0, 2);
    config.pipeline.consume_delay = DelayRange::new(0, 1);
    config.pipeline.poll_interval_ms = 1;
    config.bank.delay = DelayRange::new(0, 2);
    config.interleave.step_delay_ms = 1;
    config
}

/// Counter shape used by the reference scenario: 3 threads x 100 increments.
pub fn reference_counter() -> CounterConfig {
    fast_config().counter
}

/// Pipeline shape used by the reference scenario.
pub fn reference_pipeline() -> PipelineConfig {
    fast_config().pipeline
}

/// Bank shape with `clients` alternating clients of `requests` each.
pub fn alternating_bank(clients: usize, requests: usize) -> BankConfig {
    BankConfig {
        clients,
        transactions_per_client: requests,
        alternate: true,
        ..fast_config().bank
    }
}
