//! LedgerAccount: balance and journal behind one lock
//!
//! ## Request sequence
//!
//! ```text
//! 1. Validate amount > 0           (outside the lock; no state touched)
//!    IF invalid: return Rejected    (not journaled)
//! 2. Acquire the account lock
//! 3. Read initial_balance
//! 4. Withdrawal only: IF balance < amount
//!      journal a failed record, return Declined
//!    Deposit only: IF balance + amount overflows
//!      return Rejected             (not journaled)
//! 5. Mutate balance
//! 6. Journal a success record
//! 7. Release the lock, return Applied
//! ```
//!
//! Steps 3-6 form one critical section, so no other request can observe or
//! act on an intermediate balance. The balance and the journal share the same
//! lock, so a journal drained under it always reconciles with the balance
//! read under it.
//!
//! Rejected and declined requests are expected outcomes. They are returned as
//! [`TxOutcome`] values and never as errors.

use lockwise_core::{Amount, ClientId, Transaction, TransactionKind, TxOutcome};
use parking_lot::Mutex;
use std::collections::VecDeque;
use tracing::debug;

/// Reason recorded on declined withdrawals
pub const INSUFFICIENT_FUNDS: &str = "insufficient funds";

/// Rejection reason for a deposit the balance cannot hold
pub const AMOUNT_TOO_LARGE: &str = "Amount too large";

#[derive(Debug)]
struct LedgerState {
    balance: Amount,
    journal: VecDeque<Transaction>,
}

/// Bank account shared by concurrent clients
#[derive(Debug)]
pub struct LedgerAccount {
    state: Mutex<LedgerState>,
}

impl LedgerAccount {
    /// Open an account with `initial_balance`
    ///
    /// A negative opening balance is clamped to zero.
    pub fn new(initial_balance: Amount) -> Self {
        let balance = if initial_balance.is_negative() {
            Amount::ZERO
        } else {
            initial_balance
        };
        LedgerAccount {
            state: Mutex::new(LedgerState {
                balance,
                journal: VecDeque::new(),
            }),
        }
    }

    /// Balance at this instant
    pub fn get_balance(&self) -> Amount {
        self.state.lock().balance
    }

    /// Number of journal records not yet drained
    pub fn journal_len(&self) -> usize {
        self.state.lock().journal.len()
    }

    /// Add `amount` to the balance
    pub fn deposit(&self, amount: Amount, client_id: &str) -> TxOutcome {
        if !amount.is_positive() {
            return TxOutcome::Rejected {
                reason: "Invalid deposit amount".to_string(),
            };
        }

        let outcome = {
            let mut state = self.state.lock();
            let initial_balance = state.balance;
            match initial_balance.checked_add(amount) {
                Some(balance) => {
                    state.balance = balance;
                    state.journal.push_back(Transaction::success(
                        ClientId::new(client_id),
                        TransactionKind::Deposit,
                        amount,
                        initial_balance,
                        balance,
                    ));
                    TxOutcome::Applied {
                        kind: TransactionKind::Deposit,
                        amount,
                        balance,
                    }
                }
                None => TxOutcome::Rejected {
                    reason: AMOUNT_TOO_LARGE.to_string(),
                },
            }
        };

        debug!(
            target: "lockwise::ledger",
            client = client_id,
            %amount,
            success = outcome.is_success(),
            "Deposit processed"
        );
        outcome
    }

    /// Take `amount` from the balance if it covers it
    pub fn withdraw(&self, amount: Amount, client_id: &str) -> TxOutcome {
        if !amount.is_positive() {
            return TxOutcome::Rejected {
                reason: "Invalid withdrawal amount".to_string(),
            };
        }

        let outcome = {
            let mut state = self.state.lock();
            let initial_balance = state.balance;

            if initial_balance < amount {
                state.journal.push_back(Transaction::failed(
                    ClientId::new(client_id),
                    TransactionKind::Withdrawal,
                    amount,
                    initial_balance,
                    INSUFFICIENT_FUNDS,
                ));
                TxOutcome::Declined {
                    reason: "Insufficient funds".to_string(),
                }
            } else {
                state.balance -= amount;
                let balance = state.balance;
                state.journal.push_back(Transaction::success(
                    ClientId::new(client_id),
                    TransactionKind::Withdrawal,
                    amount,
                    initial_balance,
                    balance,
                ));
                TxOutcome::Applied {
                    kind: TransactionKind::Withdrawal,
                    amount,
                    balance,
                }
            }
        };

        debug!(
            target: "lockwise::ledger",
            client = client_id,
            %amount,
            success = outcome.is_success(),
            "Withdrawal processed"
        );
        outcome
    }

    /// Remove and return every journal record, oldest first
    pub fn drain_journal(&self) -> Vec<Transaction> {
        self.state.lock().journal.drain(..).collect()
    }
}
