//! Bank run: concurrent clients against one LedgerAccount
//!
//! Each client issues a fixed number of deposits and withdrawals, tallies
//! which ones succeeded, and pauses between requests. After every client is
//! joined the journal is drained into the report, so the report alone is
//! enough to reconcile the final balance.

use crate::config::BankConfig;
use crate::delay::DelayRange;
use crate::worker::{join_all, Worker};
use lockwise_concurrency::LedgerAccount;
use lockwise_core::{Amount, ClientId, Result, Transaction, TransactionKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Per-client tallies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientStats {
    /// Client that issued the requests
    pub client_id: ClientId,
    /// Requests that moved money
    pub successful: usize,
    /// Requests that were declined or rejected
    pub failed: usize,
}

/// Outcome of one bank run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankReport {
    /// Balance the account opened with
    pub initial_balance: Amount,
    /// Balance after every client finished
    pub final_balance: Amount,
    /// One entry per client, in client order
    pub clients: Vec<ClientStats>,
    /// Drained journal, oldest first
    pub journal: Vec<Transaction>,
    /// Wall time from first spawn to last join
    pub elapsed: Duration,
}

impl BankReport {
    /// Sum of the journal's successful mutations
    pub fn net_change(&self) -> Amount {
        self.journal.iter().map(Transaction::net_effect).sum()
    }

    /// Total of successful deposits
    pub fn total_deposited(&self) -> Amount {
        self.successful_total(TransactionKind::Deposit)
    }

    /// Total of successful withdrawals
    pub fn total_withdrawn(&self) -> Amount {
        self.successful_total(TransactionKind::Withdrawal)
    }

    /// `final == initial + deposits - withdrawals` over the journal
    pub fn reconciles(&self) -> bool {
        self.final_balance == self.initial_balance + self.net_change()
    }

    fn successful_total(&self, kind: TransactionKind) -> Amount {
        self.journal
            .iter()
            .filter(|t| t.is_success() && t.kind() == kind)
            .map(Transaction::amount)
            .sum()
    }
}

struct ClientPlan {
    id: ClientId,
    requests: usize,
    deposit_max: i64,
    withdraw_max: i64,
    alternate: bool,
    delay: DelayRange,
}

fn client_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
        None => StdRng::from_entropy(),
    }
}

fn run_client(account: &LedgerAccount, plan: ClientPlan, mut rng: StdRng) -> ClientStats {
    let mut stats = ClientStats {
        client_id: plan.id.clone(),
        successful: 0,
        failed: 0,
    };

    for i in 0..plan.requests {
        let deposit = if plan.alternate {
            i % 2 == 0
        } else {
            rng.gen_bool(0.5)
        };

        let outcome = if deposit {
            let amount = Amount::from_dollars(rng.gen_range(1..=plan.deposit_max));
            account.deposit(amount, plan.id.as_str())
        } else {
            let amount = Amount::from_dollars(rng.gen_range(1..=plan.withdraw_max));
            account.withdraw(amount, plan.id.as_str())
        };

        if outcome.is_success() {
            stats.successful += 1;
        } else {
            stats.failed += 1;
        }
        info!(target: "lockwise::bank", client = %plan.id, message = %outcome.message());

        plan.delay.pause(&mut rng);
    }

    stats
}

/// Run every client against one account and drain its journal
pub fn run_bank(config: &BankConfig) -> Result<BankReport> {
    config.validate()?;

    let initial_balance = config.opening_balance();
    let account = Arc::new(LedgerAccount::new(initial_balance));
    let start = Instant::now();

    let clients = (0..config.clients)
        .map(|c| {
            let account = Arc::clone(&account);
            let plan = ClientPlan {
                id: ClientId::numbered(c + 1),
                requests: config.transactions_per_client,
                deposit_max: config.deposit_max,
                withdraw_max: config.withdraw_max,
                alternate: config.alternate,
                delay: config.delay,
            };
            let rng = client_rng(config.seed, c);
            Worker::spawn(plan.id.to_string(), move || run_client(&account, plan, rng))
        })
        .collect::<Result<Vec<_>>>()?;

    let clients = join_all(clients)?;

    let report = BankReport {
        initial_balance,
        final_balance: account.get_balance(),
        clients,
        journal: account.drain_journal(),
        elapsed: start.elapsed(),
    };

    info!(
        target: "lockwise::bank",
        initial = %report.initial_balance,
        closing = %report.final_balance,
        records = report.journal.len(),
        "Bank run complete"
    );
    Ok(report)
}
