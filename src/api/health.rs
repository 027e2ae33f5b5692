use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::api::envelope::Envelope;

/// Service metadata served at `/`
#[tracing::instrument]
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Property Dashboard API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "properties": "/api/properties"
        }
    }))
}

#[tracing::instrument]
pub async fn health() -> Json<Value> {
    tracing::debug!("health check requested");

    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME")
    }))
}

pub async fn not_found() -> (StatusCode, Json<Envelope<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::failure("Route not found")),
    )
}
