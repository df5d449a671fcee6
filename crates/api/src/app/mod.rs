//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: ledger service over the in-memory account store
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and mapping into domain types
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router over a fresh in-memory store (entrypoint used by `main.rs`).
pub fn build_app() -> Router {
    build_app_with(Arc::new(services::build_services()))
}

/// Build the router over existing services (lets tests seed or inspect state).
pub fn build_app_with(services: Arc<services::AppServices>) -> Router {
    routes::router().layer(Extension(services))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn call(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let app = build_app();
        let req = Request::post("/accounts")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = call(app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_body");
    }

    #[tokio::test]
    async fn non_numeric_account_id_is_a_bad_request() {
        let app = build_app();
        let req = Request::get("/accounts/abc").body(Body::empty()).unwrap();

        let (status, body) = call(app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_account_number");
    }

    #[tokio::test]
    async fn transfer_route_is_not_shadowed_by_account_id() {
        let services = Arc::new(services::build_services());
        let app = build_app_with(Arc::clone(&services));

        let req = post_json(
            "/accounts/transfer",
            serde_json::json!({ "sourceId": 1, "destId": 2, "amount": 10 }),
        );
        let (status, body) = call(app, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "source_account_not_found");
    }

    #[tokio::test]
    async fn health_is_ok() {
        let req = Request::get("/health").body(Body::empty()).unwrap();
        let (status, _) = call(build_app(), req).await;
        assert_eq!(status, StatusCode::OK);
    }
}
