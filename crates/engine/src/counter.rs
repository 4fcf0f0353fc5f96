//! Counter run: N threads x R increments on one shared counter
//!
//! Run once per mode to contrast outcomes. In guarded mode `actual` always
//! equals `expected`; in unguarded mode `actual <= expected` and the gap
//! varies from run to run.

use crate::config::CounterConfig;
use crate::worker::{join_all, Worker};
use lockwise_concurrency::GuardedCounter;
use lockwise_core::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Which increment path the workers use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterMode {
    /// `increment_guarded`
    Guarded,
    /// `increment_unguarded`
    Unguarded,
}

impl fmt::Display for CounterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterMode::Guarded => f.write_str("Synchronized"),
            CounterMode::Unguarded => f.write_str("Unsynchronized"),
        }
    }
}

/// Outcome of one counter run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterReport {
    /// Increment path used
    pub mode: CounterMode,
    /// `workers * iterations`
    pub expected: u64,
    /// Final counter value
    pub actual: u64,
    /// Wall time from first spawn to last join
    pub elapsed: Duration,
}

impl CounterReport {
    /// True if no update was lost
    pub fn is_consistent(&self) -> bool {
        self.actual == self.expected
    }

    /// How many increments were overwritten
    pub fn lost_updates(&self) -> u64 {
        self.expected.saturating_sub(self.actual)
    }
}

/// Run `config.workers` threads against one counter in `mode`
pub fn run_counter(config: &CounterConfig, mode: CounterMode) -> Result<CounterReport> {
    config.validate()?;

    let counter = Arc::new(GuardedCounter::with_delay(config.delay()));
    let start = Instant::now();

    let workers = (0..config.workers)
        .map(|i| {
            let counter = Arc::clone(&counter);
            let iterations = config.iterations;
            let name = format!("Thread-{}", i + 1);
            let thread_name = name.clone();
            Worker::spawn(name, move || {
                info!(target: "lockwise::counter", worker = %thread_name, %mode, "Starting");
                for _ in 0..iterations {
                    match mode {
                        CounterMode::Guarded => counter.increment_guarded(),
                        CounterMode::Unguarded => counter.increment_unguarded(),
                    }
                }
                info!(target: "lockwise::counter", worker = %thread_name, "Finished");
            })
        })
        .collect::<Result<Vec<_>>>()?;

    join_all(workers)?;

    let report = CounterReport {
        mode,
        expected: config.expected_total(),
        actual: counter.read(),
        elapsed: start.elapsed(),
    };

    info!(
        target: "lockwise::counter",
        %mode,
        expected = report.expected,
        actual = report.actual,
        lost = report.lost_updates(),
        "Counter run complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick(workers: usize, iterations: usize) -> CounterConfig {
        CounterConfig {
            workers,
            iterations,
            delay_us: 0,
        }
    }

    #[test]
    fn guarded_run_is_consistent() {
        let report = run_counter(&quick(3, 100), CounterMode::Guarded).unwrap();
        assert_eq!(report.expected, 300);
        assert_eq!(report.actual, 300);
        assert!(report.is_consistent());
        assert_eq!(report.lost_updates(), 0);
    }

    #[test]
    fn unguarded_run_never_overcounts() {
        let report = run_counter(&quick(3, 100), CounterMode::Unguarded).unwrap();
        assert!(report.actual <= report.expected);
        assert_eq!(report.lost_updates(), report.expected - report.actual);
    }

    #[test]
    fn zero_iterations() {
        let report = run_counter(&quick(2, 0), CounterMode::Guarded).unwrap();
        assert_eq!(report.actual, 0);
        assert!(report.is_consistent());
    }

    #[test]
    fn mode_display() {
        assert_eq!(CounterMode::Guarded.to_string(), "Synchronized");
        assert_eq!(CounterMode::Unguarded.to_string(), "Unsynchronized");
    }
}
