use axum::{routing::get, Json, Router};
use serde::Serialize;
use slotbook_core::models::response::ApiResponse;
use std::sync::Arc;

use crate::ApiState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct VersionResponse {
    version: &'static str,
}

async fn health_check() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok("Service is up", HealthResponse { status: "ok" }))
}

async fn version() -> Json<ApiResponse<VersionResponse>> {
    Json(ApiResponse::ok(
        "Slotbook API",
        VersionResponse {
            version: env!("CARGO_PKG_VERSION"),
        },
    ))
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}
