use axum::{http::StatusCode, response::IntoResponse, Json};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Project banner.
pub async fn start() -> impl IntoResponse {
    Json(serde_json::json!({
        "project": "Digital Bank",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
