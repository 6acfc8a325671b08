//! Health check handler

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{error::Result, handlers::log_handler_error, state::AppState};

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    /// Status indicator (always "ok")
    pub status: String,
}

/// GET /api/v1/health
///
/// Reports whether the service and its document store are reachable.
/// Does not require authentication.
///
/// # HTTP Status Codes
/// - `200 OK`: Store reachable
/// - `500 INTERNAL_SERVER_ERROR`: Store unreachable
///
/// # Example
/// ```bash
/// curl http://localhost:3000/api/v1/health
/// # Returns: {"status":"ok"}
/// ```
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthCheckResponse>> {
    state
        .store
        .ping()
        .await
        .inspect_err(|e| log_handler_error("health_check", e))?;

    #[cfg(debug_assertions)]
    tracing::debug!(operation = "health_check", "Store reachable");

    Ok(Json(HealthCheckResponse {
        status: "ok".to_string(),
    }))
}
