//! Bank scenarios

use crate::common::*;
use lockwise::{
    run_bank, Amount, BankConfig, LedgerAccount, TransactionStatus, INSUFFICIENT_FUNDS,
};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn alternating_clients_reconcile() {
    let config = BankConfig {
        seed: Some(11),
        ..alternating_bank(2, 5)
    };
    let report = run_bank(&config).unwrap();

    assert_eq!(report.initial_balance, Amount::from_dollars(1000));
    assert_eq!(report.journal.len(), 10);
    assert!(report.reconciles());
    assert!(!report.final_balance.is_negative());
}

#[test]
fn journal_chains_balance_transitions() {
    let report = run_bank(&alternating_bank(3, 6)).unwrap();

    let mut balance = report.initial_balance;
    for tx in &report.journal {
        assert_eq!(tx.initial_balance(), balance);
        balance = tx.final_balance();
    }
    assert_eq!(balance, report.final_balance);
}

#[test]
fn failed_records_leave_balance_untouched() {
    let config = BankConfig {
        initial_balance: 0,
        withdraw_max: 1000,
        deposit_max: 1,
        seed: Some(3),
        ..alternating_bank(4, 4)
    };
    let report = run_bank(&config).unwrap();

    for tx in report
        .journal
        .iter()
        .filter(|t| t.status() == TransactionStatus::Failed)
    {
        assert_eq!(tx.initial_balance(), tx.final_balance());
        assert_eq!(tx.reason(), Some(INSUFFICIENT_FUNDS));
    }
    assert!(report.reconciles());
}

#[test]
fn racing_withdrawals_never_overdraw() {
    let account = Arc::new(LedgerAccount::new(Amount::from_dollars(100)));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let account = Arc::clone(&account);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                account
                    .withdraw(Amount::from_dollars(30), &format!("Client-{}", i + 1))
                    .is_success()
            })
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 3);
    assert_eq!(account.get_balance(), Amount::from_dollars(10));
    assert_eq!(account.drain_journal().len(), 8);
}
