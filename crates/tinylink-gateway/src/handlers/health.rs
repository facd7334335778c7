use crate::model::HealthResponse;
use axum::Json;
use jiff::Timestamp;

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Timestamp::now(),
    })
}

pub async fn root_handler() -> &'static str {
    "Hello from TinyLink API"
}
