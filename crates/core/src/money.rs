//! Monetary amounts in the ledger's single implicit currency.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::DomainError;

/// Why an exact money operation produced no result.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoneyError {
    #[error("amount out of range")]
    Overflow,

    /// The exact result needs more significant digits than a `Decimal` holds.
    #[error("result cannot be represented exactly")]
    Inexact,
}

/// Exact decimal amount of money.
///
/// Serialized as a decimal string (`"150.00"`) so no precision is lost in
/// transit; deserialization also accepts JSON numbers.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(self) -> Decimal {
        self.0
    }

    /// Strictly greater than zero.
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Strictly less than zero (`-0` is not negative).
    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// `self + other`, refusing results that `Decimal` would have to round.
    pub fn exact_add(self, other: Money) -> Result<Money, MoneyError> {
        exact(self.0, other.0, Decimal::checked_add)
    }

    /// `self - other`, refusing results that `Decimal` would have to round.
    pub fn exact_sub(self, other: Money) -> Result<Money, MoneyError> {
        exact(self.0, other.0, Decimal::checked_sub)
    }
}

// `Decimal` arithmetic only drops scale when the exact result does not fit in
// 96 bits, so a result at the operands' widest scale is exact.
fn exact(lhs: Decimal, rhs: Decimal, op: fn(Decimal, Decimal) -> Option<Decimal>) -> Result<Money, MoneyError> {
    let keeps_scale = |result: Decimal, l: Decimal, r: Decimal| result.scale() >= l.scale().max(r.scale());

    let result = op(lhs, rhs).ok_or(MoneyError::Overflow)?;
    if keeps_scale(result, lhs, rhs) {
        return Ok(Money(result));
    }

    // Trailing zeros may have forced the rescale; retry without them.
    let (lhs, rhs) = (lhs.normalize(), rhs.normalize());
    let result = op(lhs, rhs).ok_or(MoneyError::Overflow)?;
    if keeps_scale(result, lhs, rhs) {
        Ok(Money(result))
    } else {
        Err(MoneyError::Inexact)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Money)
            .map_err(|e| DomainError::validation(format!("invalid amount {s:?}: {e}")))
    }
}
