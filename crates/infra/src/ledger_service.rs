//! Ledger orchestration: lookup, locking, then the pure ledger operation.
//!
//! Every mutation follows the same shape:
//!
//! ```text
//! locate record(s) in the repository
//!   ↓
//! lock record(s) (transfers: ascending account number)
//!   ↓
//! run the pure operation from `digibank-accounts`
//!   ↓
//! return a snapshot of the updated record
//! ```
//!
//! Lock hold time is bounded by one operation; nothing here blocks on IO.

use std::sync::{Mutex, MutexGuard};

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{info, warn};

use digibank_accounts::{self as accounts, Account, CloseOutcome, LedgerError, NewAccount};
use digibank_core::{AccountNumber, Money};

use crate::repository::{AccountHandle, AccountRepository, RepositoryError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// A ledger rule refused the request; nothing was changed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The store itself failed (e.g. a poisoned lock).
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::DuplicateNumber(n) => ServiceError::Ledger(LedgerError::DuplicateAccountNumber(n)),
            RepositoryError::NumbersExhausted => ServiceError::Ledger(LedgerError::AccountNumbersExhausted),
            other => ServiceError::Storage(other.to_string()),
        }
    }
}

/// Confirmation returned by [`LedgerService::close`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Closure {
    pub account: Account,
    pub outcome: CloseOutcome,
}

fn lock(handle: &AccountHandle) -> Result<MutexGuard<'_, Account>, ServiceError> {
    handle
        .lock()
        .map_err(|_| ServiceError::Storage("account record lock poisoned".to_string()))
}

/// Application service over an [`AccountRepository`].
#[derive(Debug)]
pub struct LedgerService<R> {
    repo: R,
}

impl<R: AccountRepository> LedgerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a candidate, judging its opening date against the local date.
    pub fn register(&self, candidate: NewAccount) -> Result<Account, ServiceError> {
        self.register_on(candidate, Local::now().date_naive())
    }

    pub fn register_on(&self, candidate: NewAccount, today: NaiveDate) -> Result<Account, ServiceError> {
        let draft = candidate
            .validated(today)
            .map_err(LedgerError::from)
            .inspect_err(|e| warn!(error = %e, "account registration rejected"))?;

        let account = self
            .repo
            .insert(draft)
            .map_err(ServiceError::from)
            .inspect_err(|e| warn!(error = %e, "account registration rejected"))?;

        info!(
            account = %account.number(),
            kind = %account.kind(),
            balance = %account.balance(),
            "account registered"
        );
        Ok(account)
    }

    pub fn list(&self) -> Result<Vec<Account>, ServiceError> {
        Ok(self.repo.list()?)
    }

    pub fn find_by_number(&self, number: AccountNumber) -> Result<Account, ServiceError> {
        let handle = self.locate(number)?;
        let account = lock(&handle)?;
        Ok(account.clone())
    }

    pub fn find_by_tax_id(&self, tax_id: &str) -> Result<Account, ServiceError> {
        let handle = self
            .repo
            .find_by_tax_id(tax_id)?
            .ok_or_else(|| LedgerError::TaxIdNotFound(tax_id.to_string()))?;
        let account = lock(&handle)?;
        Ok(account.clone())
    }

    pub fn deposit(&self, number: AccountNumber, amount: Money) -> Result<Account, ServiceError> {
        let handle = self.locate(number)?;
        let mut account = lock(&handle)?;

        accounts::deposit(&mut account, amount)
            .inspect_err(|e| warn!(account = %number, %amount, error = %e, "deposit rejected"))?;

        info!(account = %number, %amount, balance = %account.balance(), "deposit applied");
        Ok(account.clone())
    }

    pub fn withdraw(&self, number: AccountNumber, amount: Money) -> Result<Account, ServiceError> {
        let handle = self.locate(number)?;
        let mut account = lock(&handle)?;

        accounts::withdraw(&mut account, amount)
            .inspect_err(|e| warn!(account = %number, %amount, error = %e, "withdrawal rejected"))?;

        info!(account = %number, %amount, balance = %account.balance(), "withdrawal applied");
        Ok(account.clone())
    }

    /// Move `amount` between two accounts and return the updated source.
    pub fn transfer(
        &self,
        source: AccountNumber,
        destination: AccountNumber,
        amount: Money,
    ) -> Result<Account, ServiceError> {
        let source_handle = self
            .repo
            .find_by_number(source)?
            .ok_or(LedgerError::SourceAccountNotFound(source))?;
        let destination_handle = self
            .repo
            .find_by_number(destination)?
            .ok_or(LedgerError::DestinationAccountNotFound(destination))?;

        // Same mutex twice would deadlock.
        if source == destination {
            warn!(account = %source, %amount, "transfer rejected: same account");
            return Err(LedgerError::SameAccountTransfer.into());
        }

        let (mut from, mut to) = lock_pair(&source_handle, source, &destination_handle, destination)?;

        accounts::transfer(&mut from, &mut to, amount).inspect_err(|e| {
            warn!(source = %source, destination = %destination, %amount, error = %e, "transfer rejected")
        })?;

        info!(
            source = %source,
            destination = %destination,
            %amount,
            source_balance = %from.balance(),
            destination_balance = %to.balance(),
            "transfer applied"
        );
        Ok(from.clone())
    }

    pub fn close(&self, number: AccountNumber) -> Result<Closure, ServiceError> {
        let handle = self.locate(number)?;
        let mut account = lock(&handle)?;

        let outcome = accounts::close(&mut account);
        match outcome {
            CloseOutcome::Closed => info!(account = %number, "account closed"),
            CloseOutcome::AlreadyClosed => info!(account = %number, "account was already closed"),
        }

        Ok(Closure {
            account: account.clone(),
            outcome,
        })
    }

    fn locate(&self, number: AccountNumber) -> Result<AccountHandle, ServiceError> {
        Ok(self
            .repo
            .find_by_number(number)?
            .ok_or(LedgerError::AccountNotFound(number))?)
    }
}

/// Lock two distinct records in ascending account-number order and return
/// the guards as (first argument, second argument).
fn lock_pair<'a>(
    a: &'a Mutex<Account>,
    a_number: AccountNumber,
    b: &'a Mutex<Account>,
    b_number: AccountNumber,
) -> Result<(MutexGuard<'a, Account>, MutexGuard<'a, Account>), ServiceError> {
    let poisoned = |_| ServiceError::Storage("account record lock poisoned".to_string());

    if a_number < b_number {
        let ga = a.lock().map_err(poisoned)?;
        let gb = b.lock().map_err(poisoned)?;
        Ok((ga, gb))
    } else {
        let gb = b.lock().map_err(poisoned)?;
        let ga = a.lock().map_err(poisoned)?;
        Ok((ga, gb))
    }
}
