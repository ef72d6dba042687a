//! Liveness and readiness probes

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[skip_serializing_none]
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    /// `ready` or `unavailable`
    pub status: String,
    pub okapi_url: String,
    pub tenant: String,
    /// Why Okapi could not be reached
    pub error: Option<String>,
}

/// The process is up
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Ready once the Okapi gateway answers for the configured tenant
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Okapi reachable", body = ReadinessResponse),
        (status = 503, description = "Okapi unreachable", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let okapi = &state.config.okapi;
    let (status, error) = match state.services.check_upstream().await {
        Ok(()) => (StatusCode::OK, None),
        Err(e) => {
            tracing::warn!("Okapi at {} is not reachable: {}", okapi.url, e);
            (StatusCode::SERVICE_UNAVAILABLE, Some(e.to_string()))
        }
    };

    let body = ReadinessResponse {
        status: if error.is_none() { "ready" } else { "unavailable" }.to_string(),
        okapi_url: okapi.url.clone(),
        tenant: okapi.tenant.clone(),
        error,
    };
    (status, Json(body))
}
