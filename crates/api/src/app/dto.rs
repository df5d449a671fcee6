use chrono::NaiveDate;
use serde::Deserialize;

use digibank_accounts::{LedgerError, NewAccount};
use digibank_core::{AccountNumber, Money};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccountRequest {
    pub number: Option<u64>,
    pub branch: Option<String>,
    pub holder_name: Option<String>,
    pub holder_tax_id: Option<String>,
    pub opened_on: Option<NaiveDate>,
    pub balance: Option<Money>,
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: Money,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub source_id: u64,
    pub dest_id: u64,
    pub amount: Money,
}

// -------------------------
// Mapping helpers
// -------------------------

pub fn parse_account_number(raw: &str) -> Result<AccountNumber, LedgerError> {
    raw.parse::<AccountNumber>()
        .map_err(|e| LedgerError::InvalidAccountNumber(e.to_string()))
}

pub fn account_number(value: u64) -> Result<AccountNumber, LedgerError> {
    AccountNumber::new(value).map_err(|e| LedgerError::InvalidAccountNumber(e.to_string()))
}

impl RegisterAccountRequest {
    /// Map into a registration candidate; only the number is checked here.
    pub fn into_candidate(self) -> Result<NewAccount, LedgerError> {
        let number = self.number.map(account_number).transpose()?;
        Ok(NewAccount {
            number,
            branch: self.branch,
            holder_name: self.holder_name,
            holder_tax_id: self.holder_tax_id,
            opened_on: self.opened_on,
            balance: self.balance,
            kind: self.kind,
        })
    }
}

pub fn close_to_json(closure: &digibank_infra::Closure) -> serde_json::Value {
    let already_closed = closure.outcome == digibank_accounts::CloseOutcome::AlreadyClosed;
    serde_json::json!({
        "message": if already_closed { "account was already closed" } else { "account closed successfully" },
        "number": closure.account.number(),
        "alreadyClosed": already_closed,
    })
}
