use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use digibank_accounts::{LedgerError, ValidationError};
use digibank_infra::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Ledger(e) => ledger_error_to_response(e),
        ServiceError::Storage(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", msg),
    }
}

pub fn ledger_error_to_response(err: LedgerError) -> axum::response::Response {
    let (status, code) = match &err {
        LedgerError::Validation(v) => (StatusCode::BAD_REQUEST, validation_code(*v)),
        LedgerError::InvalidAccountNumber(_) => (StatusCode::BAD_REQUEST, "invalid_account_number"),
        LedgerError::DuplicateAccountNumber(_) => (StatusCode::BAD_REQUEST, "duplicate_account_number"),
        LedgerError::AccountNotFound(_) => (StatusCode::NOT_FOUND, "account_not_found"),
        LedgerError::TaxIdNotFound(_) => (StatusCode::NOT_FOUND, "tax_id_not_found"),
        LedgerError::SourceAccountNotFound(_) => (StatusCode::NOT_FOUND, "source_account_not_found"),
        LedgerError::DestinationAccountNotFound(_) => {
            (StatusCode::NOT_FOUND, "destination_account_not_found")
        }
        LedgerError::SameAccountTransfer => (StatusCode::BAD_REQUEST, "same_account_transfer"),
        LedgerError::InvalidAmount => (StatusCode::BAD_REQUEST, "invalid_amount"),
        LedgerError::AccountClosed(_) => (StatusCode::BAD_REQUEST, "account_closed"),
        LedgerError::InsufficientFunds { .. } => (StatusCode::BAD_REQUEST, "insufficient_funds"),
        LedgerError::BalanceOverflow(_) => (StatusCode::BAD_REQUEST, "balance_overflow"),
        LedgerError::PrecisionLoss(_) => (StatusCode::BAD_REQUEST, "precision_loss"),
        LedgerError::AccountNumbersExhausted => (StatusCode::BAD_REQUEST, "account_numbers_exhausted"),
    };
    json_error(status, code, err.to_string())
}

fn validation_code(err: ValidationError) -> &'static str {
    match err {
        ValidationError::MissingRequiredField => "missing_required_field",
        ValidationError::NegativeInitialBalance => "negative_initial_balance",
        ValidationError::FutureOpenDate => "future_open_date",
        ValidationError::InvalidAccountKind => "invalid_account_kind",
    }
}

pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
