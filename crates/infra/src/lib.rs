//! Infrastructure layer: account storage, ledger orchestration, config.

pub mod config;
pub mod ledger_service;
pub mod repository;

pub use ledger_service::{Closure, LedgerService, ServiceError};
pub use repository::{AccountHandle, AccountRepository, InMemoryAccountRepository, RepositoryError};
