//! Expiration handlers

use axum::{
    extract::{Query, State},
    Json,
};

use domain_client::ClientePortExt;
use domain_expiration::{
    list_vencimientos, month_buckets, nearest_expiration, resumen, VencimientosQuery,
    VencimientosResumen,
};

use crate::dto::vencimientos::{ExpirationView, MonthBucketView, VencimientoCliente, VencimientosParams};
use crate::error::ApiError;
use crate::AppState;

/// Clients with an expiration today or later, nearest first
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<VencimientosParams>,
) -> Result<Json<Vec<VencimientoCliente>>, ApiError> {
    let query = VencimientosQuery::from_params(
        params.days.as_deref(),
        params.mes.as_deref(),
        params.estado.as_deref(),
    )?;
    let today = state.calendar.today();
    let clientes = state.clientes.list_all().await?;
    let settings = state.settings.get_or_create().await?;

    let items = list_vencimientos(clientes, &query, today)
        .into_iter()
        .map(|cliente| VencimientoCliente {
            proximo_vencimiento: nearest_expiration(&cliente, today)
                .map(|n| ExpirationView::from_nearest(&n, &settings)),
            cliente,
        })
        .collect();
    Ok(Json(items))
}

/// 30/60-day policy counts and status totals
pub async fn get_resumen(
    State(state): State<AppState>,
) -> Result<Json<VencimientosResumen>, ApiError> {
    let clientes = state.clientes.list_all().await?;
    Ok(Json(resumen(&clientes, state.calendar.today())))
}

/// The 12-month expiration chart
pub async fn por_mes(State(state): State<AppState>) -> Result<Json<Vec<MonthBucketView>>, ApiError> {
    let clientes = state.clientes.list_all().await?;
    let settings = state.settings.get_or_create().await?;
    let buckets = month_buckets(&clientes, state.calendar.today())
        .into_iter()
        .map(|b| MonthBucketView::new(b, &settings))
        .collect();
    Ok(Json(buckets))
}
