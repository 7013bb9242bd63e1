//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use core_kernel::{AdapterHealth, HealthCheckResult};

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub env: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub adapters: Vec<HealthCheckResult>,
}

/// Liveness probe
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "CRM Seguros API".to_string(),
        timestamp: Utc::now(),
        env: state.config.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (includes storage)
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let adapters = vec![
        state.clientes.health_check().await,
        state.settings.health_check().await,
        state.usuarios.health_check().await,
    ];
    let ready = adapters.iter().all(|a| a.status == AdapterHealth::Healthy);
    let (status, label) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        status,
        Json(ReadinessResponse {
            status: label.to_string(),
            adapters,
        }),
    )
}
