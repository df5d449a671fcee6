use axum::{routing::get, Router};

pub mod accounts;
pub mod system;

/// Router for every endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/start", get(system::start))
        .nest("/accounts", accounts::router())
}
