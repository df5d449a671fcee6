//! Accounts module (account records, registration rules, balance mutations).
//!
//! Pure domain logic only: no IO, no HTTP, no locking. Callers hand in the
//! records they already hold exclusively.

pub mod account;
pub mod ledger;
pub mod validation;

pub use account::{Account, AccountDraft, AccountKind, NewAccount};
pub use ledger::{close, deposit, transfer, withdraw, CloseOutcome, LedgerError};
pub use validation::{validate, ValidationError};
