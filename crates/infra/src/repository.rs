//! Account store: the single source of truth for account records.

use std::sync::{Arc, Mutex, RwLock};

use thiserror::Error;

use digibank_accounts::{Account, AccountDraft};
use digibank_core::AccountNumber;

/// Shared, exclusively-lockable account record.
pub type AccountHandle = Arc<Mutex<Account>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("account number {0} is already in use")]
    DuplicateNumber(AccountNumber),

    #[error("no account numbers left to assign")]
    NumbersExhausted,

    #[error("account store lock poisoned")]
    Poisoned,
}

/// Storage abstraction for accounts.
///
/// Lookups hand out per-record handles; callers lock a handle for the
/// duration of a single read-modify-write.
pub trait AccountRepository: Send + Sync {
    /// Admit a validated draft, assigning the next free number unless the
    /// draft requested one.
    fn insert(&self, draft: AccountDraft) -> Result<Account, RepositoryError>;

    fn find_by_number(&self, number: AccountNumber) -> Result<Option<AccountHandle>, RepositoryError>;

    /// Exact match on the holder tax id; the earliest registration wins.
    fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<AccountHandle>, RepositoryError>;

    /// Snapshot of every account in registration order.
    fn list(&self) -> Result<Vec<Account>, RepositoryError>;
}

impl<S> AccountRepository for Arc<S>
where
    S: AccountRepository + ?Sized,
{
    fn insert(&self, draft: AccountDraft) -> Result<Account, RepositoryError> {
        (**self).insert(draft)
    }

    fn find_by_number(&self, number: AccountNumber) -> Result<Option<AccountHandle>, RepositoryError> {
        (**self).find_by_number(number)
    }

    fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<AccountHandle>, RepositoryError> {
        (**self).find_by_tax_id(tax_id)
    }

    fn list(&self) -> Result<Vec<Account>, RepositoryError> {
        (**self).list()
    }
}

// Number and tax id never change after admission, so scans read them here
// without touching the record lock.
#[derive(Debug)]
struct Slot {
    number: AccountNumber,
    holder_tax_id: String,
    record: AccountHandle,
}

/// In-memory arena of accounts.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    slots: RwLock<Vec<Slot>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One past the highest number in use; once that runs off the end of the
/// range, the lowest number nobody holds.
fn next_free_number(slots: &[Slot]) -> Option<AccountNumber> {
    let Some(highest) = slots.iter().map(|s| s.number).max() else {
        return Some(AccountNumber::FIRST);
    };
    if let Some(next) = highest.next() {
        return Some(next);
    }

    let mut taken: Vec<AccountNumber> = slots.iter().map(|s| s.number).collect();
    taken.sort_unstable();
    let mut candidate = AccountNumber::FIRST;
    for number in taken {
        if number > candidate {
            break;
        }
        candidate = candidate.next()?;
    }
    Some(candidate)
}

impl AccountRepository for InMemoryAccountRepository {
    fn insert(&self, draft: AccountDraft) -> Result<Account, RepositoryError> {
        let mut slots = self.slots.write().map_err(|_| RepositoryError::Poisoned)?;

        let number = match draft.requested_number() {
            Some(n) => {
                if slots.iter().any(|s| s.number == n) {
                    return Err(RepositoryError::DuplicateNumber(n));
                }
                n
            }
            None => next_free_number(&slots).ok_or(RepositoryError::NumbersExhausted)?,
        };

        let account = draft.open(number);
        slots.push(Slot {
            number,
            holder_tax_id: account.holder_tax_id().to_string(),
            record: Arc::new(Mutex::new(account.clone())),
        });
        Ok(account)
    }

    fn find_by_number(&self, number: AccountNumber) -> Result<Option<AccountHandle>, RepositoryError> {
        let slots = self.slots.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(slots
            .iter()
            .find(|s| s.number == number)
            .map(|s| Arc::clone(&s.record)))
    }

    fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<AccountHandle>, RepositoryError> {
        let slots = self.slots.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(slots
            .iter()
            .find(|s| s.holder_tax_id == tax_id)
            .map(|s| Arc::clone(&s.record)))
    }

    fn list(&self) -> Result<Vec<Account>, RepositoryError> {
        let handles: Vec<AccountHandle> = {
            let slots = self.slots.read().map_err(|_| RepositoryError::Poisoned)?;
            slots.iter().map(|s| Arc::clone(&s.record)).collect()
        };

        handles
            .iter()
            .map(|h| h.lock().map(|a| a.clone()).map_err(|_| RepositoryError::Poisoned))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use digibank_accounts::NewAccount;
    use digibank_core::Money;
    use rust_decimal_macros::dec;

    fn draft(number: Option<u64>, tax_id: &str, name: &str) -> AccountDraft {
        let today = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap();
        NewAccount {
            number: number.map(|n| AccountNumber::new(n).unwrap()),
            branch: Some("0001".to_string()),
            holder_name: Some(name.to_string()),
            holder_tax_id: Some(tax_id.to_string()),
            opened_on: Some(today),
            balance: Some(Money::new(dec!(10))),
            kind: Some("checking".to_string()),
        }
        .validated(today)
        .unwrap()
    }

    #[test]
    fn assigns_monotonic_numbers_starting_at_one() {
        let repo = InMemoryAccountRepository::new();
        let a = repo.insert(draft(None, "111", "A")).unwrap();
        let b = repo.insert(draft(None, "222", "B")).unwrap();
        assert_eq!(a.number().get(), 1);
        assert_eq!(b.number().get(), 2);
    }

    #[test]
    fn assigned_numbers_skip_past_client_supplied_ones() {
        let repo = InMemoryAccountRepository::new();
        repo.insert(draft(Some(10), "111", "A")).unwrap();
        let next = repo.insert(draft(None, "222", "B")).unwrap();
        assert_eq!(next.number().get(), 11);
    }

    #[test]
    fn assignment_falls_back_to_lowest_gap_after_the_top_number_is_taken() {
        let repo = InMemoryAccountRepository::new();
        repo.insert(draft(Some(u64::MAX), "111", "Top")).unwrap();
        repo.insert(draft(Some(2), "222", "Two")).unwrap();

        let first = repo.insert(draft(None, "333", "A")).unwrap();
        let second = repo.insert(draft(None, "444", "B")).unwrap();
        assert_eq!(first.number().get(), 1);
        assert_eq!(second.number().get(), 3);
    }

    #[test]
    fn rejects_duplicate_client_supplied_number() {
        let repo = InMemoryAccountRepository::new();
        repo.insert(draft(Some(5), "111", "A")).unwrap();
        let err = repo.insert(draft(Some(5), "222", "B")).unwrap_err();
        assert_eq!(err, RepositoryError::DuplicateNumber(AccountNumber::new(5).unwrap()));
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn tax_id_lookup_returns_first_registration() {
        let repo = InMemoryAccountRepository::new();
        repo.insert(draft(None, "555", "First")).unwrap();
        repo.insert(draft(None, "555", "Second")).unwrap();

        let handle = repo.find_by_tax_id("555").unwrap().unwrap();
        assert_eq!(handle.lock().unwrap().holder_name(), "First");
        assert!(repo.find_by_tax_id("55").unwrap().is_none());
    }

    #[test]
    fn number_lookup_shares_the_stored_record() {
        let repo = InMemoryAccountRepository::new();
        let created = repo.insert(draft(None, "111", "A")).unwrap();

        let h1 = repo.find_by_number(created.number()).unwrap().unwrap();
        let h2 = repo.find_by_number(created.number()).unwrap().unwrap();
        assert!(Arc::ptr_eq(&h1, &h2));
        assert!(repo.find_by_number(AccountNumber::new(99).unwrap()).unwrap().is_none());
    }

    #[test]
    fn list_preserves_registration_order() {
        let repo = InMemoryAccountRepository::new();
        repo.insert(draft(Some(3), "1", "C")).unwrap();
        repo.insert(draft(Some(1), "2", "A")).unwrap();
        let numbers: Vec<u64> = repo.list().unwrap().iter().map(|a| a.number().get()).collect();
        assert_eq!(numbers, vec![3, 1]);
    }
}
