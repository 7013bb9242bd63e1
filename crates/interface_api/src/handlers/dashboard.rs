//! Dashboard handler

use axum::{extract::State, Json};

use domain_client::ClientePortExt;
use domain_expiration::dashboard;

use crate::dto::dashboard::DashboardResponse;
use crate::error::ApiError;
use crate::AppState;

/// KPIs, the monthly chart and the nearest expirations
pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, ApiError> {
    let clientes = state.clientes.list_all().await?;
    let settings = state.settings.get_or_create().await?;
    let summary = dashboard(&clientes, state.calendar.today(), settings.alert_window_days);
    Ok(Json(DashboardResponse::new(summary, &settings)))
}
