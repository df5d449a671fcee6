//! Registration rules for new accounts.

use chrono::NaiveDate;
use thiserror::Error;

use crate::account::{AccountKind, NewAccount};

/// Why a registration candidate was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("holder name and holder tax id are required")]
    MissingRequiredField,

    #[error("initial balance cannot be negative")]
    NegativeInitialBalance,

    #[error("opening date is required and cannot be in the future")]
    FutureOpenDate,

    #[error("invalid account kind; valid kinds: CHECKING, SAVINGS, PAYROLL")]
    InvalidAccountKind,
}

/// Check a candidate before it is admitted to the store.
///
/// Checks run in a fixed order and stop at the first failure: holder fields,
/// balance sign, opening date, kind.
pub fn validate(candidate: &NewAccount, today: NaiveDate) -> Result<(), ValidationError> {
    if is_blank(candidate.holder_name.as_deref()) || is_blank(candidate.holder_tax_id.as_deref()) {
        return Err(ValidationError::MissingRequiredField);
    }

    if candidate.balance.is_some_and(|b| b.is_negative()) {
        return Err(ValidationError::NegativeInitialBalance);
    }

    match candidate.opened_on {
        Some(opened_on) if opened_on <= today => {}
        _ => return Err(ValidationError::FutureOpenDate),
    }

    let kind_ok = candidate
        .kind
        .as_deref()
        .is_some_and(|k| k.parse::<AccountKind>().is_ok());
    if !kind_ok {
        return Err(ValidationError::InvalidAccountKind);
    }

    Ok(())
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use digibank_core::Money;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn valid() -> NewAccount {
        NewAccount {
            number: None,
            branch: None,
            holder_name: Some("Bruno Lima".to_string()),
            holder_tax_id: Some("98765432100".to_string()),
            opened_on: Some(today()),
            balance: Some(Money::new(dec!(0))),
            kind: Some("CHECKING".to_string()),
        }
    }

    #[test]
    fn accepts_a_complete_candidate_opened_today() {
        assert_eq!(validate(&valid(), today()), Ok(()));
    }

    #[test]
    fn rejects_empty_holder_name() {
        let c = NewAccount {
            holder_name: Some(String::new()),
            ..valid()
        };
        assert_eq!(validate(&c, today()), Err(ValidationError::MissingRequiredField));
    }

    #[test]
    fn rejects_missing_or_blank_tax_id() {
        let missing = NewAccount {
            holder_tax_id: None,
            ..valid()
        };
        let blank = NewAccount {
            holder_tax_id: Some("   ".to_string()),
            ..valid()
        };
        assert_eq!(validate(&missing, today()), Err(ValidationError::MissingRequiredField));
        assert_eq!(validate(&blank, today()), Err(ValidationError::MissingRequiredField));
    }

    #[test]
    fn rejects_negative_initial_balance() {
        let c = NewAccount {
            balance: Some(Money::new(dec!(-0.01))),
            ..valid()
        };
        assert_eq!(validate(&c, today()), Err(ValidationError::NegativeInitialBalance));
    }

    #[test]
    fn rejects_future_open_date() {
        let c = NewAccount {
            opened_on: today().succ_opt(),
            ..valid()
        };
        assert_eq!(validate(&c, today()), Err(ValidationError::FutureOpenDate));
    }

    #[test]
    fn rejects_missing_open_date() {
        let c = NewAccount {
            opened_on: None,
            ..valid()
        };
        assert_eq!(validate(&c, today()), Err(ValidationError::FutureOpenDate));
    }

    #[test]
    fn rejects_unrecognized_kind() {
        let c = NewAccount {
            kind: Some("BROKERAGE".to_string()),
            ..valid()
        };
        assert_eq!(validate(&c, today()), Err(ValidationError::InvalidAccountKind));

        let missing = NewAccount { kind: None, ..valid() };
        assert_eq!(validate(&missing, today()), Err(ValidationError::InvalidAccountKind));
    }

    #[test]
    fn reports_the_first_failing_rule() {
        let c = NewAccount {
            holder_name: None,
            balance: Some(Money::new(dec!(-5))),
            kind: Some("nope".to_string()),
            ..valid()
        };
        assert_eq!(validate(&c, today()), Err(ValidationError::MissingRequiredField));
    }
}
