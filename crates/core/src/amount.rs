//! Fixed-point monetary amounts
//!
//! Balances and transaction amounts are stored as whole cents in an `i64`.
//! Integer cents keep ledger arithmetic exact, so reconciliation checks
//! (`initial + deposits - withdrawals == final`) compare with `==`.
//!
//! The type is signed so that a non-positive request can be represented and
//! then rejected by validation. A ledger balance itself never goes negative.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Monetary amount in cents
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Zero dollars
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from cents
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Amount(cents)
    }

    /// Create an amount from whole dollars
    #[inline]
    pub const fn from_dollars(dollars: i64) -> Self {
        Amount(dollars.saturating_mul(100))
    }

    /// Create an amount from whole dollars, `None` if the cents overflow
    #[inline]
    pub const fn checked_from_dollars(dollars: i64) -> Option<Self> {
        match dollars.checked_mul(100) {
            Some(cents) => Some(Amount(cents)),
            None => None,
        }
    }

    /// Sum, `None` on overflow
    #[inline]
    pub const fn checked_add(self, rhs: Amount) -> Option<Amount> {
        match self.0.checked_add(rhs.0) {
            Some(cents) => Some(Amount(cents)),
            None => None,
        }
    }

    /// Difference, `None` on overflow
    #[inline]
    pub const fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        match self.0.checked_sub(rhs.0) {
            Some(cents) => Some(Amount(cents)),
            None => None,
        }
    }

    /// Get the amount in cents
    #[inline]
    pub const fn as_cents(&self) -> i64 {
        self.0
    }

    /// True if the amount is strictly greater than zero
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// True if the amount is below zero
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Amount) {
        self.0 -= rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}
