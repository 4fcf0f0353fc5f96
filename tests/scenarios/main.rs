//! End-to-end scenarios
//!
//! Full runs through the public facade with shortened pauses: counter
//! consistency, pipeline exactly-once consumption, bank reconciliation and
//! config file loading.

#[path = "../common/mod.rs"]
mod common;

mod bank_scenarios;
mod config_scenarios;
mod counter_scenarios;
mod pipeline_scenarios;
