use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_accounts).post(register_account))
        .route("/transfer", post(transfer))
        .route("/tax-id/:tax_id", get(get_account_by_tax_id))
        .route("/:id", get(get_account))
        .route("/:id/close", put(close_account))
        .route("/:id/deposit", post(deposit))
        .route("/:id/withdraw", post(withdraw))
}

pub async fn list_accounts(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.ledger().list() {
        Ok(accounts) => (StatusCode::OK, Json(accounts)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn register_account(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::RegisterAccountRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let candidate = match body.into_candidate() {
        Ok(c) => c,
        Err(e) => return errors::ledger_error_to_response(e),
    };

    match services.ledger().register(candidate) {
        Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_account(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let number = match dto::parse_account_number(&id) {
        Ok(n) => n,
        Err(e) => return errors::ledger_error_to_response(e),
    };

    match services.ledger().find_by_number(number) {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_account_by_tax_id(
    Extension(services): Extension<Arc<AppServices>>,
    Path(tax_id): Path<String>,
) -> axum::response::Response {
    match services.ledger().find_by_tax_id(&tax_id) {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn close_account(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let number = match dto::parse_account_number(&id) {
        Ok(n) => n,
        Err(e) => return errors::ledger_error_to_response(e),
    };

    match services.ledger().close(number) {
        Ok(closure) => (StatusCode::OK, Json(dto::close_to_json(&closure))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn deposit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::AmountRequest>, JsonRejection>,
) -> axum::response::Response {
    let number = match dto::parse_account_number(&id) {
        Ok(n) => n,
        Err(e) => return errors::ledger_error_to_response(e),
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.ledger().deposit(number, body.amount) {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn withdraw(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::AmountRequest>, JsonRejection>,
) -> axum::response::Response {
    let number = match dto::parse_account_number(&id) {
        Ok(n) => n,
        Err(e) => return errors::ledger_error_to_response(e),
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.ledger().withdraw(number, body.amount) {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn transfer(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::TransferRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let (source, destination) = match (dto::account_number(body.source_id), dto::account_number(body.dest_id)) {
        (Ok(s), Ok(d)) => (s, d),
        (Err(e), _) | (_, Err(e)) => return errors::ledger_error_to_response(e),
    };

    match services.ledger().transfer(source, destination, body.amount) {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
