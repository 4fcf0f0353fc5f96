//! Core types for Lockwise
//!
//! This crate defines the foundational types shared by the guarded entities,
//! the harness and the CLI:
//! - Amount: Fixed-point monetary value in integer cents
//! - ClientId: Identifier of a bank client worker
//! - Transaction: Immutable journal record of a ledger mutation attempt
//! - TxOutcome: Typed result of a deposit/withdraw request
//! - Error: Harness and configuration error hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod amount;
pub mod error;
pub mod transaction;

pub use amount::Amount;
pub use error::{Error, Result};
pub use transaction::{ClientId, Transaction, TransactionKind, TransactionStatus, TxOutcome};
