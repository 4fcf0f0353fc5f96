//! Guarded shared state for Lockwise
//!
//! This crate implements the entities that worker threads share:
//! - GuardedCounter: Integer with an unguarded (racy) and a guarded increment
//! - GuardedSequence: Ordered collection with append / remove / snapshot
//! - LedgerAccount: Balance plus transaction journal behind one lock
//!
//! Every entity owns exactly one `parking_lot::Mutex`. The lock is private and
//! only taken inside methods, so callers cannot hold it across their own code
//! and cannot forget to release it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod account;
pub mod counter;
pub mod sequence;

pub use account::{LedgerAccount, AMOUNT_TOO_LARGE, INSUFFICIENT_FUNDS};
pub use counter::{GuardedCounter, DEFAULT_INCREMENT_DELAY};
pub use sequence::GuardedSequence;
