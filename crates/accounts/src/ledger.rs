//! Balance mutations and closure.
//!
//! Each operation checks all of its pre-conditions before touching the
//! record, so a rejected call leaves every account exactly as it was.

use thiserror::Error;

use digibank_core::{AccountNumber, Money, MoneyError};

use crate::account::Account;
use crate::validation::ValidationError;

/// Ledger rule failures (registration, lookup and balance rules).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid account number: {0}")]
    InvalidAccountNumber(String),

    #[error("account number {0} is already in use")]
    DuplicateAccountNumber(AccountNumber),

    #[error("account {0} not found")]
    AccountNotFound(AccountNumber),

    #[error("no account found for tax id {0}")]
    TaxIdNotFound(String),

    #[error("source account {0} not found")]
    SourceAccountNotFound(AccountNumber),

    #[error("destination account {0} not found")]
    DestinationAccountNotFound(AccountNumber),

    #[error("source and destination must be different accounts")]
    SameAccountTransfer,

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("account {0} is closed")]
    AccountClosed(AccountNumber),

    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Money, available: Money },

    #[error("balance of account {0} would overflow")]
    BalanceOverflow(AccountNumber),

    #[error("new balance of account {0} cannot be represented exactly")]
    PrecisionLoss(AccountNumber),

    #[error("no account numbers left to assign")]
    AccountNumbersExhausted,
}

/// Result of closing an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    AlreadyClosed,
}

fn ensure_positive(amount: Money) -> Result<(), LedgerError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount)
    }
}

fn ensure_active(account: &Account) -> Result<(), LedgerError> {
    if account.is_active() {
        Ok(())
    } else {
        Err(LedgerError::AccountClosed(account.number()))
    }
}

fn settled(account: &Account, balance: Result<Money, MoneyError>) -> Result<Money, LedgerError> {
    balance.map_err(|e| match e {
        MoneyError::Overflow => LedgerError::BalanceOverflow(account.number()),
        MoneyError::Inexact => LedgerError::PrecisionLoss(account.number()),
    })
}

fn credited(account: &Account, amount: Money) -> Result<Money, LedgerError> {
    settled(account, account.balance().exact_add(amount))
}

fn debited(account: &Account, amount: Money) -> Result<Money, LedgerError> {
    let available = account.balance();
    if available < amount {
        return Err(LedgerError::InsufficientFunds {
            requested: amount,
            available,
        });
    }
    settled(account, available.exact_sub(amount))
}

/// Credit `amount` to an active account.
pub fn deposit(account: &mut Account, amount: Money) -> Result<(), LedgerError> {
    ensure_positive(amount)?;
    ensure_active(account)?;

    let balance = credited(account, amount)?;
    account.set_balance(balance);
    Ok(())
}

/// Debit `amount` from an active account holding at least that much.
pub fn withdraw(account: &mut Account, amount: Money) -> Result<(), LedgerError> {
    ensure_positive(amount)?;
    ensure_active(account)?;

    let balance = debited(account, amount)?;
    account.set_balance(balance);
    Ok(())
}

/// Move `amount` from `source` to `destination`.
///
/// Both new balances are computed first; the records are only written once
/// neither computation failed.
pub fn transfer(source: &mut Account, destination: &mut Account, amount: Money) -> Result<(), LedgerError> {
    if source.number() == destination.number() {
        return Err(LedgerError::SameAccountTransfer);
    }
    ensure_positive(amount)?;
    ensure_active(source)?;
    ensure_active(destination)?;

    let source_balance = debited(source, amount)?;
    let destination_balance = credited(destination, amount)?;

    source.set_balance(source_balance);
    destination.set_balance(destination_balance);
    Ok(())
}

/// Mark the account inactive. Closing twice is a no-op.
pub fn close(account: &mut Account) -> CloseOutcome {
    if !account.is_active() {
        return CloseOutcome::AlreadyClosed;
    }
    account.deactivate();
    CloseOutcome::Closed
}
