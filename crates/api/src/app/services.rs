use std::sync::Arc;

use digibank_infra::{InMemoryAccountRepository, LedgerService};

/// Ledger service as wired for this binary.
pub type AccountLedger = LedgerService<Arc<InMemoryAccountRepository>>;

/// Services shared by every handler.
#[derive(Debug)]
pub struct AppServices {
    ledger: AccountLedger,
}

impl AppServices {
    pub fn new(ledger: AccountLedger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &AccountLedger {
        &self.ledger
    }
}

/// In-memory wiring: one empty account store per process.
pub fn build_services() -> AppServices {
    let repo = Arc::new(InMemoryAccountRepository::new());
    AppServices::new(LedgerService::new(repo))
}
