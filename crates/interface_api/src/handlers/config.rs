//! Settings handlers

use axum::{extract::State, Json};
use tracing::info;

use domain_settings::{RawSettingsPatch, Settings, SettingsPatch};

use crate::error::{ApiError, ApiJson};
use crate::AppState;

/// Returns the settings, creating the defaults on first use
pub async fn get_config(State(state): State<AppState>) -> Result<Json<Settings>, ApiError> {
    Ok(Json(state.settings.get_or_create().await?))
}

/// Merges a partial update into the settings
pub async fn update_config(
    State(state): State<AppState>,
    ApiJson(raw): ApiJson<RawSettingsPatch>,
) -> Result<Json<Settings>, ApiError> {
    let patch = SettingsPatch::try_from(raw)?;
    let updated = state.settings.update(patch).await?;
    info!(
        alert_window_days = updated.alert_window_days,
        "Settings updated"
    );
    Ok(Json(updated))
}
