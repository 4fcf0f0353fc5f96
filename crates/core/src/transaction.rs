//! Ledger journal records and request outcomes
//!
//! A [`Transaction`] is written by a ledger account for every balance
//! mutation attempt that passes validation, including declined withdrawals.
//! Records are immutable once created: all fields are private and exposed
//! through accessors.
//!
//! A [`TxOutcome`] is what the caller of `deposit`/`withdraw` gets back.
//! There are three outcomes and only two of them are journaled:
//!
//! | Outcome    | Balance changed | Journaled          |
//! |------------|-----------------|--------------------|
//! | `Applied`  | yes             | yes, `success`     |
//! | `Declined` | no              | yes, `failed`      |
//! | `Rejected` | no              | no                 |

use crate::amount::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the client that issued a request (e.g. `Client-1`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Create a client id from any string
    pub fn new(id: impl Into<String>) -> Self {
        ClientId(id.into())
    }

    /// Client id for the n-th client, numbered from 1
    pub fn numbered(n: usize) -> Self {
        ClientId(format!("Client-{}", n))
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        ClientId(s.to_string())
    }
}

/// Direction of a balance mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money added to the account
    Deposit,
    /// Money taken from the account
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => f.write_str("deposit"),
            TransactionKind::Withdrawal => f.write_str("withdrawal"),
        }
    }
}

/// Whether a journaled attempt changed the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Balance was mutated
    Success,
    /// Attempt was declined; balance unchanged
    Failed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Success => f.write_str("success"),
            TransactionStatus::Failed => f.write_str("failed"),
        }
    }
}

/// Journal record of one ledger mutation attempt
///
/// ## Invariants
///
/// - `Success` deposits: `final_balance == initial_balance + amount`
/// - `Success` withdrawals: `final_balance == initial_balance - amount`
/// - `Failed` records: `final_balance == initial_balance`, `reason` is set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    client_id: ClientId,
    kind: TransactionKind,
    amount: Amount,
    initial_balance: Amount,
    final_balance: Amount,
    timestamp: DateTime<Utc>,
    status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl Transaction {
    /// Record a mutation that was applied
    pub fn success(
        client_id: ClientId,
        kind: TransactionKind,
        amount: Amount,
        initial_balance: Amount,
        final_balance: Amount,
    ) -> Self {
        Transaction {
            client_id,
            kind,
            amount,
            initial_balance,
            final_balance,
            timestamp: Utc::now(),
            status: TransactionStatus::Success,
            reason: None,
        }
    }

    /// Record an attempt that was declined against `balance`
    pub fn failed(
        client_id: ClientId,
        kind: TransactionKind,
        amount: Amount,
        balance: Amount,
        reason: impl Into<String>,
    ) -> Self {
        Transaction {
            client_id,
            kind,
            amount,
            initial_balance: balance,
            final_balance: balance,
            timestamp: Utc::now(),
            status: TransactionStatus::Failed,
            reason: Some(reason.into()),
        }
    }

    /// Client that issued the request
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Deposit or withdrawal
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Requested amount
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Balance observed when the request entered the critical section
    pub fn initial_balance(&self) -> Amount {
        self.initial_balance
    }

    /// Balance when the request left the critical section
    pub fn final_balance(&self) -> Amount {
        self.final_balance
    }

    /// When the record was created
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Success or failed
    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Why the attempt failed, if it did
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// True if the balance was mutated
    pub fn is_success(&self) -> bool {
        self.status == TransactionStatus::Success
    }

    /// Signed effect of this record on the balance
    ///
    /// Zero for failed records.
    pub fn net_effect(&self) -> Amount {
        match (self.status, self.kind) {
            (TransactionStatus::Failed, _) => Amount::ZERO,
            (TransactionStatus::Success, TransactionKind::Deposit) => self.amount,
            (TransactionStatus::Success, TransactionKind::Withdrawal) => {
                Amount::ZERO - self.amount
            }
        }
    }
}

/// Result of a deposit or withdrawal request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum TxOutcome {
    /// The balance was mutated and a `success` record was journaled
    Applied {
        /// Deposit or withdrawal
        kind: TransactionKind,
        /// Amount moved
        amount: Amount,
        /// Balance after the mutation
        balance: Amount,
    },
    /// Valid request refused by business rules; a `failed` record was journaled
    Declined {
        /// Why the request was refused
        reason: String,
    },
    /// Request failed validation; nothing was journaled
    Rejected {
        /// Why the request was invalid
        reason: String,
    },
}

impl TxOutcome {
    /// True only for `Applied`
    pub fn is_success(&self) -> bool {
        matches!(self, TxOutcome::Applied { .. })
    }

    /// True if the outcome produced a journal record
    pub fn is_journaled(&self) -> bool {
        !matches!(self, TxOutcome::Rejected { .. })
    }

    /// Human-readable message, e.g. `Deposited $12.00` or `Insufficient funds`
    pub fn message(&self) -> String {
        match self {
            TxOutcome::Applied {
                kind: TransactionKind::Deposit,
                amount,
                ..
            } => format!("Deposited {}", amount),
            TxOutcome::Applied {
                kind: TransactionKind::Withdrawal,
                amount,
                ..
            } => format!("Withdrew {}", amount),
            TxOutcome::Declined { reason } | TxOutcome::Rejected { reason } => reason.clone(),
        }
    }

    /// Flatten into the `(success, message)` pair
    pub fn into_parts(self) -> (bool, String) {
        (self.is_success(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_numbered() {
        assert_eq!(ClientId::numbered(3).as_str(), "Client-3");
        assert_eq!(ClientId::from("Client-7").to_string(), "Client-7");
    }

    #[test]
    fn test_success_record_brackets_change() {
        let tx = Transaction::success(
            ClientId::numbered(1),
            TransactionKind::Deposit,
            Amount::from_dollars(50),
            Amount::from_dollars(1000),
            Amount::from_dollars(1050),
        );
        assert!(tx.is_success());
        assert_eq!(tx.reason(), None);
        assert_eq!(tx.final_balance() - tx.initial_balance(), tx.amount());
        assert_eq!(tx.net_effect(), Amount::from_dollars(50));
    }

    #[test]
    fn test_failed_record_keeps_balance() {
        let tx = Transaction::failed(
            ClientId::numbered(2),
            TransactionKind::Withdrawal,
            Amount::from_dollars(500),
            Amount::from_dollars(20),
            "insufficient funds",
        );
        assert_eq!(tx.status(), TransactionStatus::Failed);
        assert_eq!(tx.initial_balance(), tx.final_balance());
        assert_eq!(tx.reason(), Some("insufficient funds"));
        assert_eq!(tx.net_effect(), Amount::ZERO);
    }

    #[test]
    fn test_withdrawal_net_effect_is_negative() {
        let tx = Transaction::success(
            ClientId::numbered(1),
            TransactionKind::Withdrawal,
            Amount::from_dollars(30),
            Amount::from_dollars(100),
            Amount::from_dollars(70),
        );
        assert_eq!(tx.net_effect(), Amount::from_dollars(-30));
    }

    #[test]
    fn test_outcome_messages() {
        let deposit = TxOutcome::Applied {
            kind: TransactionKind::Deposit,
            amount: Amount::from_dollars(12),
            balance: Amount::from_dollars(1012),
        };
        assert_eq!(deposit.message(), "Deposited $12.00");

        let withdraw = TxOutcome::Applied {
            kind: TransactionKind::Withdrawal,
            amount: Amount::from_cents(999),
            balance: Amount::from_dollars(0),
        };
        assert_eq!(withdraw.message(), "Withdrew $9.99");

        let declined = TxOutcome::Declined {
            reason: "Insufficient funds".to_string(),
        };
        assert_eq!(declined.clone().into_parts(), (false, "Insufficient funds".to_string()));
        assert!(declined.is_journaled());
    }

    #[test]
    fn test_rejected_is_not_journaled() {
        let rejected = TxOutcome::Rejected {
            reason: "Invalid deposit amount".to_string(),
        };
        assert!(!rejected.is_success());
        assert!(!rejected.is_journaled());
    }

    #[test]
    fn test_transaction_serializes_lowercase_enums() {
        let tx = Transaction::failed(
            ClientId::numbered(1),
            TransactionKind::Withdrawal,
            Amount::from_dollars(5),
            Amount::ZERO,
            "insufficient funds",
        );
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["kind"], "withdrawal");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["client_id"], "Client-1");
        assert_eq!(json["reason"], "insufficient funds");
    }
}
