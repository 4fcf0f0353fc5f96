//! Harness for Lockwise
//!
//! Spawns named worker threads against the guarded entities, joins them and
//! aggregates typed reports:
//! - counter: N threads x R increments, guarded or unguarded
//! - pipeline: producers and polling consumers on one shared sequence
//! - bank: concurrent clients against one ledger account
//! - interleave: number and square threads emitting side by side
//!
//! All run settings come from [`HarnessConfig`] (`lockwise.toml`).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bank;
pub mod config;
pub mod counter;
pub mod delay;
pub mod interleave;
pub mod pipeline;
pub mod worker;

pub use bank::{run_bank, BankReport, ClientStats};
pub use config::{
    BankConfig, CounterConfig, HarnessConfig, InterleaveConfig, PipelineConfig, CONFIG_FILE_NAME,
    MAX_INTERLEAVE_COUNT,
};
pub use counter::{run_counter, CounterMode, CounterReport};
pub use delay::DelayRange;
pub use interleave::{run_interleave, InterleaveReport};
pub use pipeline::{consume_targets, run_pipeline, ConsumerReport, PipelineReport};
pub use worker::{join_all, Worker};
