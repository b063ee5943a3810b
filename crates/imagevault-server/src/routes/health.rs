//! Health check endpoint

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe, always healthy while the process is serving.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "imagevault-server"
    }))
}
