//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

/// Fixed liveness payload.
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
}

/// GET /health
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy",
        service: "qr-generator",
    })
}
