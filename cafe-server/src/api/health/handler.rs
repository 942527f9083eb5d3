//! Health check handler

use axum::Json;
use serde::Serialize;
use shared::util;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: i64,
}

/// GET /api/health - liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: util::now_millis(),
    })
}
