//! Interleave run: two threads emitting in parallel
//!
//! `Number Thread` emits 1, 2, 3, ... and `Square Thread` emits 1, 4, 9, ...
//! Each emission is appended to a shared sequence as `"{thread}: {value}"`,
//! so the report records the order the scheduler actually produced.

use crate::config::InterleaveConfig;
use crate::worker::{join_all, Worker};
use lockwise_concurrency::GuardedSequence;
use lockwise_core::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

/// Thread that emits `i`
pub const NUMBER_THREAD: &str = "Number Thread";
/// Thread that emits `i * i`
pub const SQUARE_THREAD: &str = "Square Thread";

/// Outcome of one interleave run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterleaveReport {
    /// Emissions in observed order
    pub lines: Vec<String>,
    /// Wall time from first spawn to last join
    pub elapsed: Duration,
}

impl InterleaveReport {
    /// Values emitted by `thread`, in emission order
    pub fn values_for(&self, thread: &str) -> Vec<u64> {
        self.lines
            .iter()
            .filter_map(|line| line.split_once(": "))
            .filter(|(name, _)| *name == thread)
            .filter_map(|(_, value)| value.parse().ok())
            .collect()
    }
}

fn emit(lines: &GuardedSequence<String>, name: &str, count: u64, step: Duration, f: fn(u64) -> u64) {
    info!(target: "lockwise::interleave", worker = name, "Starting");
    for i in 1..=count {
        lines.append(format!("{}: {}", name, f(i)));
        if !step.is_zero() {
            thread::sleep(step);
        }
    }
    info!(target: "lockwise::interleave", worker = name, "Finished");
}

/// Run the number and square threads side by side
pub fn run_interleave(config: &InterleaveConfig) -> Result<InterleaveReport> {
    config.validate()?;

    let lines: Arc<GuardedSequence<String>> = Arc::new(GuardedSequence::new());
    let start = Instant::now();

    let emitters: [(&'static str, fn(u64) -> u64); 2] =
        [(NUMBER_THREAD, |i| i), (SQUARE_THREAD, |i| i * i)];

    let workers = emitters
        .into_iter()
        .map(|(name, f)| {
            let lines = Arc::clone(&lines);
            let count = config.count;
            let step = config.step_delay();
            Worker::spawn(name, move || emit(&lines, name, count, step, f))
        })
        .collect::<Result<Vec<_>>>()?;

    join_all(workers)?;

    Ok(InterleaveReport {
        lines: lines.snapshot(),
        elapsed: start.elapsed(),
    })
}
