//! Harness configuration via `lockwise.toml`
//!
//! Every field has a serde default, so an empty file (or no file at all)
//! reproduces the classic demo: 3 workers x 100 increments, 2 producers and
//! 2 consumers, 3 bank clients against a $1000 account.

use crate::delay::DelayRange;
use lockwise_core::{Amount, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Config file name looked up by the CLI
pub const CONFIG_FILE_NAME: &str = "lockwise.toml";

/// Counter race demonstration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Number of incrementing threads
    pub workers: usize,
    /// Increments per thread
    pub iterations: usize,
    /// Pause between read and write-back inside each increment, in microseconds
    pub delay_us: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            workers: 3,
            iterations: 100,
            delay_us: 100,
        }
    }
}

impl CounterConfig {
    /// Pause inside each increment
    pub fn delay(&self) -> Duration {
        Duration::from_micros(self.delay_us)
    }

    /// Increments a lossless run ends with
    pub fn expected_total(&self) -> u64 {
        (self.workers as u64).saturating_mul(self.iterations as u64)
    }

    /// Check this section's invariants
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::invalid_config("counter.workers must be at least 1"));
        }
        Ok(())
    }
}

/// Producer/consumer pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of producer threads
    pub producers: usize,
    /// Items each producer appends
    pub items_per_producer: usize,
    /// Number of consumer threads; consumer k targets producer k's items
    pub consumers: usize,
    /// Items each consumer must claim before it stops
    pub targets_per_consumer: usize,
    /// Pause after each append
    pub produce_delay: DelayRange,
    /// Pause after each successful claim
    pub consume_delay: DelayRange,
    /// Sleep between scans when no wanted item is present, in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            producers: 2,
            items_per_producer: 5,
            consumers: 2,
            targets_per_consumer: 3,
            produce_delay: DelayRange::new(100, 300),
            consume_delay: DelayRange::new(100, 200),
            poll_interval_ms: 100,
        }
    }
}

impl PipelineConfig {
    /// Sleep between empty scans
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Item names consumer `k` (0-based) waits for
    pub fn targets_for(&self, consumer: usize) -> Vec<String> {
        (0..self.targets_per_consumer)
            .map(|i| item_name(&producer_name(consumer), i))
            .collect()
    }

    /// Check this section's invariants
    ///
    /// Every target must be produced, otherwise a consumer polls forever.
    pub fn validate(&self) -> Result<()> {
        if self.producers == 0 {
            return Err(Error::invalid_config("pipeline.producers must be at least 1"));
        }
        if self.consumers > self.producers {
            return Err(Error::invalid_config(format!(
                "pipeline.consumers ({}) cannot exceed pipeline.producers ({})",
                self.consumers, self.producers
            )));
        }
        if self.targets_per_consumer > self.items_per_producer {
            return Err(Error::invalid_config(format!(
                "pipeline.targets_per_consumer ({}) cannot exceed pipeline.items_per_producer ({})",
                self.targets_per_consumer, self.items_per_producer
            )));
        }
        self.produce_delay.validate("pipeline.produce_delay")?;
        self.consume_delay.validate("pipeline.consume_delay")
    }
}

/// Name of producer `k` (0-based): `Producer-{k+1}`
pub fn producer_name(index: usize) -> String {
    format!("Producer-{}", index + 1)
}

/// Name of consumer `k` (0-based): `Consumer-{k+1}`
pub fn consumer_name(index: usize) -> String {
    format!("Consumer-{}", index + 1)
}

/// Name of the i-th item appended by `producer`
pub fn item_name(producer: &str, index: usize) -> String {
    format!("{}-{}", producer, index)
}

/// Bank simulation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    /// Opening balance in whole dollars
    pub initial_balance: i64,
    /// Number of client threads
    pub clients: usize,
    /// Requests each client issues
    pub transactions_per_client: usize,
    /// Largest deposit in whole dollars
    pub deposit_max: i64,
    /// Largest withdrawal in whole dollars
    pub withdraw_max: i64,
    /// Pause after each request
    pub delay: DelayRange,
    /// Alternate deposit/withdrawal instead of choosing at random
    pub alternate: bool,
    /// Seed for the clients' RNGs; entropy when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            initial_balance: 1000,
            clients: 3,
            transactions_per_client: 5,
            deposit_max: 1000,
            withdraw_max: 500,
            delay: DelayRange::new(100, 300),
            alternate: false,
            seed: None,
        }
    }
}

impl BankConfig {
    /// Opening balance as an amount
    pub fn opening_balance(&self) -> Amount {
        Amount::from_dollars(self.initial_balance)
    }

    /// Check this section's invariants
    pub fn validate(&self) -> Result<()> {
        if self.initial_balance < 0 {
            return Err(Error::invalid_config("bank.initial_balance cannot be negative"));
        }
        if self.clients == 0 {
            return Err(Error::invalid_config("bank.clients must be at least 1"));
        }
        if self.deposit_max < 1 || self.withdraw_max < 1 {
            return Err(Error::invalid_config(
                "bank.deposit_max and bank.withdraw_max must be at least 1",
            ));
        }
        for (field, dollars) in [
            ("bank.initial_balance", self.initial_balance),
            ("bank.deposit_max", self.deposit_max),
            ("bank.withdraw_max", self.withdraw_max),
        ] {
            if Amount::checked_from_dollars(dollars).is_none() {
                return Err(Error::invalid_config(format!(
                    "{} ({}) is too large to hold in cents",
                    field, dollars
                )));
            }
        }
        if self.largest_possible_balance().is_none() {
            return Err(Error::invalid_config(
                "bank.initial_balance plus every client depositing bank.deposit_max \
                 on every request overflows the balance",
            ));
        }
        self.delay.validate("bank.delay")
    }

    /// Balance if every request were a maximal deposit, `None` on overflow
    fn largest_possible_balance(&self) -> Option<Amount> {
        let clients = i64::try_from(self.clients).ok()?;
        let requests = i64::try_from(self.transactions_per_client).ok()?;
        let deposits = clients
            .checked_mul(requests)?
            .checked_mul(self.deposit_max)?;
        Amount::checked_from_dollars(self.initial_balance.checked_add(deposits)?)
    }
}

/// Number/square interleaving settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterleaveConfig {
    /// Values each thread emits (1..=count)
    pub count: u64,
    /// Pause between emissions, in milliseconds
    pub step_delay_ms: u64,
}

impl Default for InterleaveConfig {
    fn default() -> Self {
        Self {
            count: 10,
            step_delay_ms: 500,
        }
    }
}

/// Largest `interleave.count` whose square still fits in a `u64`
pub const MAX_INTERLEAVE_COUNT: u64 = u32::MAX as u64;

impl InterleaveConfig {
    /// Pause between emissions
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Check this section's invariants
    pub fn validate(&self) -> Result<()> {
        if self.count > MAX_INTERLEAVE_COUNT {
            return Err(Error::invalid_config(format!(
                "interleave.count ({}) cannot exceed {}",
                self.count, MAX_INTERLEAVE_COUNT
            )));
        }
        Ok(())
    }
}

/// Harness configuration loaded from `lockwise.toml`.
///
/// # Example
///
/// ```toml
/// [counter]
/// workers = 3
/// iterations = 100
///
/// [bank]
/// initial_balance = 1000
/// seed = 42
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// `[counter]` section
    pub counter: CounterConfig,
    /// `[pipeline]` section
    pub pipeline: PipelineConfig,
    /// `[bank]` section
    pub bank: BankConfig,
    /// `[interleave]` section
    pub interleave: InterleaveConfig,
}

impl HarnessConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Lockwise harness configuration

[counter]
# Threads incrementing one shared counter, and increments per thread.
workers = 3
iterations = 100
# Pause between read and write-back inside each increment (microseconds).
# Longer pauses make lost updates on the unguarded path more likely.
delay_us = 100

[pipeline]
producers = 2
items_per_producer = 5
# Consumer k claims the first `targets_per_consumer` items of Producer-k.
consumers = 2
targets_per_consumer = 3
# Sleep between scans when no wanted item is present (milliseconds).
poll_interval_ms = 100
produce_delay = { min_ms = 100, max_ms = 300 }
consume_delay = { min_ms = 100, max_ms = 200 }

[bank]
# Whole dollars.
initial_balance = 1000
clients = 3
transactions_per_client = 5
deposit_max = 1000
withdraw_max = 500
delay = { min_ms = 100, max_ms = 300 }
# true: each client alternates deposit/withdrawal; false: coin flip.
alternate = false
# seed = 42

[interleave]
count = 10
step_delay_ms = 500
"#
    }

    /// Parse and validate config text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or a section is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: HarnessConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or is invalid.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        self.counter.validate()?;
        self.pipeline.validate()?;
        self.bank.validate()?;
        self.interleave.validate()
    }
}
