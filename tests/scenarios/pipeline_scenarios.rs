//! Pipeline scenarios

use crate::common::*;
use lockwise::{run_pipeline, PipelineConfig};
use std::collections::HashSet;

#[test]
fn each_target_consumed_exactly_once() {
    let report = run_pipeline(&reference_pipeline()).unwrap();

    assert_eq!(report.produced, 10);
    assert_eq!(report.consumers.len(), 2);
    assert!(report.all_targets_consumed());
    assert!(!report.has_double_consumption());

    for (k, consumer) in report.consumers.iter().enumerate() {
        let expected: HashSet<String> = (0..3)
            .map(|i| format!("Producer-{}-{}", k + 1, i))
            .collect();
        let consumed: HashSet<String> = consumer.consumed.iter().cloned().collect();
        assert_eq!(consumed, expected, "{}", consumer.name);
    }
}

#[test]
fn unclaimed_items_remain() {
    let report = run_pipeline(&reference_pipeline()).unwrap();

    let mut remaining = report.remaining.clone();
    remaining.sort();
    assert_eq!(
        remaining,
        vec!["Producer-1-3", "Producer-1-4", "Producer-2-3", "Producer-2-4"]
    );
}

#[test]
fn consumed_and_remaining_partition_produced() {
    let config = PipelineConfig {
        producers: 3,
        items_per_producer: 4,
        consumers: 3,
        targets_per_consumer: 4,
        ..reference_pipeline()
    };
    let report = run_pipeline(&config).unwrap();

    let consumed: usize = report.consumers.iter().map(|c| c.consumed.len()).sum();
    assert_eq!(consumed + report.remaining.len(), report.produced);
    assert!(report.remaining.is_empty());
}
