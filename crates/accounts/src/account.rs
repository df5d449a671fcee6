use chrono::NaiveDate;
use serde::Serialize;

use digibank_core::{AccountNumber, DomainError, Money};

use crate::validation::{self, ValidationError};

/// Account kind.
///
/// Input is case-insensitive; the legacy names `CORRENTE`, `POUPANCA` and
/// `SALARIO` are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountKind {
    Checking,
    Savings,
    Payroll,
}

impl AccountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountKind::Checking => "CHECKING",
            AccountKind::Savings => "SAVINGS",
            AccountKind::Payroll => "PAYROLL",
        }
    }
}

impl core::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for AccountKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CHECKING" | "CORRENTE" => Ok(AccountKind::Checking),
            "SAVINGS" | "POUPANCA" => Ok(AccountKind::Savings),
            "PAYROLL" | "SALARIO" => Ok(AccountKind::Payroll),
            other => Err(DomainError::validation(format!("unknown account kind {other:?}"))),
        }
    }
}

/// Registration candidate, exactly as supplied by the client.
///
/// Every field is optional so the validator (not deserialization) decides
/// which failure to report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAccount {
    pub number: Option<AccountNumber>,
    pub branch: Option<String>,
    pub holder_name: Option<String>,
    pub holder_tax_id: Option<String>,
    pub opened_on: Option<NaiveDate>,
    pub balance: Option<Money>,
    pub kind: Option<String>,
}

impl NewAccount {
    /// Validate against `today` and produce a draft ready to be admitted.
    pub fn validated(self, today: NaiveDate) -> Result<AccountDraft, ValidationError> {
        validation::validate(&self, today)?;

        // validate() guarantees presence and well-formedness of every field below.
        let (Some(holder_name), Some(holder_tax_id), Some(opened_on), Some(kind)) =
            (self.holder_name, self.holder_tax_id, self.opened_on, self.kind)
        else {
            return Err(ValidationError::MissingRequiredField);
        };
        let kind = kind.parse::<AccountKind>().map_err(|_| ValidationError::InvalidAccountKind)?;

        Ok(AccountDraft {
            requested_number: self.number,
            branch: self.branch.unwrap_or_default(),
            holder_name,
            holder_tax_id,
            opened_on,
            balance: self.balance.unwrap_or(Money::ZERO),
            kind,
        })
    }
}

/// A validated registration that has not been given a number yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDraft {
    requested_number: Option<AccountNumber>,
    branch: String,
    holder_name: String,
    holder_tax_id: String,
    opened_on: NaiveDate,
    balance: Money,
    kind: AccountKind,
}

impl AccountDraft {
    pub fn requested_number(&self) -> Option<AccountNumber> {
        self.requested_number
    }

    pub fn holder_tax_id(&self) -> &str {
        &self.holder_tax_id
    }

    /// Turn the draft into an active account under `number`.
    pub fn open(self, number: AccountNumber) -> Account {
        Account {
            number,
            branch: self.branch,
            holder_name: self.holder_name,
            holder_tax_id: self.holder_tax_id,
            opened_on: self.opened_on,
            balance: self.balance,
            active: true,
            kind: self.kind,
        }
    }
}

/// Ledger record: identity, holder, balance and lifecycle flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    number: AccountNumber,
    branch: String,
    holder_name: String,
    holder_tax_id: String,
    opened_on: NaiveDate,
    balance: Money,
    active: bool,
    kind: AccountKind,
}

impl Account {
    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn holder_tax_id(&self) -> &str {
        &self.holder_tax_id
    }

    pub fn opened_on(&self) -> NaiveDate {
        self.opened_on
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub(crate) fn set_balance(&mut self, balance: Money) {
        debug_assert!(!balance.is_negative());
        self.balance = balance;
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }
}
