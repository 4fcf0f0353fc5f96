//! Pipeline run: producers and consumers sharing one GuardedSequence
//!
//! Producers append uniquely named items. Each consumer owns a target set
//! and claims items with the snapshot-then-remove protocol of
//! [`GuardedSequence`]: whichever consumer's `remove` returns `true` owns the
//! item, so no item is consumed twice. When none of its targets is present a
//! consumer sleeps for the poll interval and scans again; there is no
//! wait/notify signalling. If a producer fails, a shared stop flag releases
//! the consumers so every thread is joined before the error is returned.

use crate::config::{consumer_name, item_name, producer_name, PipelineConfig};
use crate::delay::DelayRange;
use crate::worker::{join_all, Worker};
use lockwise_concurrency::GuardedSequence;
use lockwise_core::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// What one consumer claimed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerReport {
    /// Thread name, e.g. `Consumer-1`
    pub name: String,
    /// Items it was looking for
    pub targets: Vec<String>,
    /// Items it claimed, in claim order
    pub consumed: Vec<String>,
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Total items appended by all producers
    pub produced: usize,
    /// Sequence contents after every worker finished
    pub remaining: Vec<String>,
    /// One entry per consumer, in consumer order
    pub consumers: Vec<ConsumerReport>,
    /// Wall time from first spawn to last join
    pub elapsed: Duration,
}

impl PipelineReport {
    /// Every consumer claimed exactly its target set
    pub fn all_targets_consumed(&self) -> bool {
        self.consumers.iter().all(|c| {
            let targets: HashSet<_> = c.targets.iter().collect();
            let consumed: HashSet<_> = c.consumed.iter().collect();
            targets == consumed && c.consumed.len() == c.targets.len()
        })
    }

    /// True if any item appears in more than one consumed list (or twice in one)
    pub fn has_double_consumption(&self) -> bool {
        let mut seen = HashSet::new();
        self.consumers
            .iter()
            .flat_map(|c| c.consumed.iter())
            .any(|item| !seen.insert(item))
    }
}

/// Claim every item in `targets` from `seq`, polling until all are claimed
///
/// `targets` is treated as a set; repeated names are claimed once.
/// `on_claim` runs after each successful claim, outside any lock.
/// Returns the claimed items in claim order. Once `stop` is set the consumer
/// gives up and returns what it has claimed so far.
pub fn consume_targets<F>(
    seq: &GuardedSequence<String>,
    targets: &[String],
    poll_interval: Duration,
    stop: &AtomicBool,
    mut on_claim: F,
) -> Vec<String>
where
    F: FnMut(&str),
{
    let mut wanted: Vec<&String> = Vec::with_capacity(targets.len());
    for target in targets {
        if !wanted.contains(&target) {
            wanted.push(target);
        }
    }

    let mut consumed: Vec<String> = Vec::with_capacity(wanted.len());

    while consumed.len() < wanted.len() {
        let claimed = seq
            .snapshot()
            .into_iter()
            .filter(|item| wanted.contains(&item) && !consumed.contains(item))
            .find(|item| seq.remove(item));

        match claimed {
            Some(item) => {
                on_claim(&item);
                consumed.push(item);
            }
            None if stop.load(Ordering::Acquire) => break,
            None => thread::sleep(poll_interval),
        }
    }

    consumed
}

fn produce(seq: &GuardedSequence<String>, name: &str, count: usize, delay: DelayRange) {
    let mut rng = rand::thread_rng();
    for i in 0..count {
        let item = item_name(name, i);
        seq.append(item.clone());
        info!(target: "lockwise::pipeline", producer = name, %item, "Added");
        delay.pause(&mut rng);
    }
}

/// Run producers and consumers to completion
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport> {
    config.validate()?;

    let seq: Arc<GuardedSequence<String>> = Arc::new(GuardedSequence::new());
    let stop = Arc::new(AtomicBool::new(false));
    let start = Instant::now();

    let producers = (0..config.producers)
        .map(|p| {
            let seq = Arc::clone(&seq);
            let name = producer_name(p);
            let count = config.items_per_producer;
            let delay = config.produce_delay;
            let thread_name = name.clone();
            Worker::spawn(name, move || produce(&seq, &thread_name, count, delay))
        })
        .collect::<Result<Vec<_>>>()?;

    let consumers = (0..config.consumers)
        .map(|c| {
            let seq = Arc::clone(&seq);
            let stop = Arc::clone(&stop);
            let name = consumer_name(c);
            let targets = config.targets_for(c);
            let poll = config.poll_interval();
            let delay = config.consume_delay;
            let thread_name = name.clone();
            Worker::spawn(name, move || {
                let mut rng = rand::thread_rng();
                let consumed = consume_targets(&seq, &targets, poll, &stop, |item| {
                    info!(target: "lockwise::pipeline", consumer = %thread_name, item, "Consumed");
                    delay.pause(&mut rng);
                });
                debug!(
                    target: "lockwise::pipeline",
                    consumer = %thread_name,
                    claimed = consumed.len(),
                    "Consumer done"
                );
                ConsumerReport {
                    name: thread_name,
                    targets,
                    consumed,
                }
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // A failed producer leaves targets unproduced; release the consumers
    // before joining them.
    let produced = join_all(producers);
    if produced.is_err() {
        stop.store(true, Ordering::Release);
    }
    let consumers = join_all(consumers);
    produced?;
    let consumers = consumers?;

    let report = PipelineReport {
        produced: config.producers * config.items_per_producer,
        remaining: seq.snapshot(),
        consumers,
        elapsed: start.elapsed(),
    };

    info!(
        target: "lockwise::pipeline",
        produced = report.produced,
        remaining = report.remaining.len(),
        "Pipeline run complete"
    );
    Ok(report)
}
