//! Client handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use domain_client::{Cliente, ClienteFilter};

use crate::dto::clientes::{
    filter_params, parse_cliente_id, BulkDeleteRequest, BulkDeleteResponse, CreateClienteRequest,
    UpdateClienteRequest,
};
use crate::dto::{validation_message, ListResponse};
use crate::error::{ApiError, ApiJson};
use crate::AppState;

/// Lists clients matching the query filters, newest first
pub async fn list_clientes(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse<Cliente>>, ApiError> {
    let filter = ClienteFilter::from_params(filter_params(pairs))?;
    let predicate = filter.to_predicate(state.calendar.today())?;
    let clientes = state.clientes.list(&predicate).await?;
    Ok(Json(ListResponse::new(clientes)))
}

/// Gets a client by ID
pub async fn get_cliente(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Cliente>, ApiError> {
    let id = parse_cliente_id(&id)?;
    Ok(Json(state.clientes.get(id).await?))
}

/// Creates a client
pub async fn create_cliente(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateClienteRequest>,
) -> Result<(StatusCode, Json<Cliente>), ApiError> {
    let cliente = Cliente::create(request.into_new_cliente(&state.calendar)?)?;
    let stored = state.clientes.insert(&cliente).await?;
    info!(cliente = %stored.id, empresa = %stored.empresa, "Cliente created");
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Partially updates a client
pub async fn update_cliente(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateClienteRequest>,
) -> Result<Json<Cliente>, ApiError> {
    let id = parse_cliente_id(&id)?;
    let changes = request.into_changes(&state.calendar)?;
    let mut cliente = state.clientes.get(id).await?;
    cliente.apply(changes)?;
    Ok(Json(state.clientes.update(&cliente).await?))
}

/// Deletes a client
pub async fn delete_cliente(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_cliente_id(&id)?;
    state.clientes.delete(id).await?;
    info!(cliente = %id, "Cliente deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes every listed client; unknown ids are skipped
pub async fn bulk_delete_clientes(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<BulkDeleteRequest>,
) -> Result<Json<BulkDeleteResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(validation_message(&e)))?;
    let ids = request.parse_ids()?;
    let deleted = state.clientes.delete_many(&ids).await?;
    info!(requested = ids.len(), deleted, "Clientes bulk deleted");
    Ok(Json(BulkDeleteResponse::new(deleted)))
}
