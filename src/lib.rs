//! Lockwise - race conditions and their remedies, run live
//!
//! Three guarded shared entities and a harness that hammers them from many
//! threads:
//!
//! - [`GuardedCounter`]: a counter with both a racy and a lock-protected increment
//! - [`GuardedSequence`]: a shared list with exactly-once `remove`
//! - [`LedgerAccount`]: a bank account whose balance and journal move together
//!
//! # Quick Start
//!
//! ```ignore
//! use lockwise::{run_counter, CounterConfig, CounterMode};
//!
//! let report = run_counter(&CounterConfig::default(), CounterMode::Guarded)?;
//! assert!(report.is_consistent());
//! ```
//!
//! # Architecture
//!
//! - `lockwise-core`: value types (amounts, transactions, outcomes) and errors
//! - `lockwise-concurrency`: the guarded entities
//! - `lockwise-engine`: config, worker threads and run reports
//!
//! This crate re-exports all three.

pub use lockwise_concurrency::{
    AMOUNT_TOO_LARGE, DEFAULT_INCREMENT_DELAY, GuardedCounter, GuardedSequence, LedgerAccount,
    INSUFFICIENT_FUNDS,
};
pub use lockwise_core::{
    Amount, ClientId, Error, Result, Transaction, TransactionKind, TransactionStatus, TxOutcome,
};
pub use lockwise_engine::{
    consume_targets, join_all, run_bank, run_counter, run_interleave, run_pipeline, BankConfig,
    BankReport, ClientStats, ConsumerReport, CounterConfig, CounterMode, CounterReport, DelayRange,
    HarnessConfig, InterleaveConfig, InterleaveReport, PipelineConfig, PipelineReport, Worker,
    CONFIG_FILE_NAME, MAX_INTERLEAVE_COUNT,
};
