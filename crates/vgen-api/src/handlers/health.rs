//! Health check handlers.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Liveness check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: ReadinessChecks,
    pub simulations_in_flight: usize,
    /// Whether upstream provider credentials are present
    pub provider_configured: bool,
}

#[derive(Serialize)]
pub struct ReadinessChecks {
    pub store: CheckStatus,
    pub uploads: CheckStatus,
}

#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl CheckStatus {
    fn ok(latency_ms: u64) -> Self {
        Self {
            status: "ok".to_string(),
            error: None,
            latency_ms: Some(latency_ms),
        }
    }

    fn error(msg: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: Some(msg.into()),
            latency_ms: None,
        }
    }

    fn from_result<E: std::fmt::Display>(start: Instant, result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::ok(start.elapsed().as_millis() as u64),
            Err(e) => Self::error(e.to_string()),
        }
    }
}

/// Readiness check endpoint.
/// Checks the job store and the uploads directory.
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ReadinessResponse>)> {
    let store_check = {
        let start = Instant::now();
        CheckStatus::from_result(start, state.store.count().await.map(|_| ()))
    };

    let uploads_check = {
        let start = Instant::now();
        CheckStatus::from_result(start, state.uploads.check_connectivity().await)
    };

    let all_ok = store_check.status == "ok" && uploads_check.status == "ok";

    let response = ReadinessResponse {
        status: if all_ok { "ready" } else { "degraded" }.to_string(),
        checks: ReadinessChecks {
            store: store_check,
            uploads: uploads_check,
        },
        simulations_in_flight: state.simulator.in_flight(),
        provider_configured: state.provider.is_configured(),
    };

    if all_ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
