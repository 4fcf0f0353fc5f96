//! Error types for Lockwise
//!
//! Only the harness and the CLI produce these. Guarded core operations never
//! fail: rejected deposits, declined withdrawals and lost counter updates are
//! reported as values, not errors.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for harness runs
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (config file reads, thread spawning)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config parsed but violates a run invariant
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A worker thread panicked before finishing its iterations
    #[error("Worker '{worker}' panicked")]
    WorkerPanicked {
        /// Thread name of the failed worker
        worker: String,
    },
}

impl Error {
    /// Create an `InvalidConfig` error from anything string-like
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }

    /// Create a `WorkerPanicked` error for the named worker
    pub fn worker_panicked(worker: impl Into<String>) -> Self {
        Error::WorkerPanicked {
            worker: worker.into(),
        }
    }
}
