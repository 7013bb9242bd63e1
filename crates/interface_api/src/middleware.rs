//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

use domain_user::Usuario;

use crate::auth::{bearer_token, validate_token};
use crate::error::ApiError;
use crate::AppState;

const MISSING_TOKEN: &str = "No autorizado. Token no proporcionado.";
const INVALID_TOKEN: &str = "No autorizado. Token inválido o expirado.";
const UNKNOWN_USER: &str = "No autorizado. Usuario no encontrado.";

/// The authenticated account, inserted into request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Usuario);

/// Authentication middleware
///
/// Validates the bearer token and loads the account it names; tokens of
/// deleted accounts are rejected.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| {
            warn!("Missing or malformed Authorization header");
            ApiError::Unauthorized(MISSING_TOKEN.to_string())
        })?;

    let claims = validate_token(token, &state.config.jwt_secret).map_err(|e| {
        warn!(error = %e, "Token validation failed");
        ApiError::Unauthorized(INVALID_TOKEN.to_string())
    })?;
    let user_id = claims
        .user_id()
        .map_err(|_| ApiError::Unauthorized(INVALID_TOKEN.to_string()))?;

    let usuario = match state.usuarios.get(user_id).await {
        Ok(usuario) => usuario,
        Err(e) if e.is_not_found() => {
            warn!(user = %user_id, "Token refers to an unknown user");
            return Err(ApiError::Unauthorized(UNKNOWN_USER.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    request.extensions_mut().insert(CurrentUser(usuario));
    Ok(next.run(request).await)
}

/// Audit logging middleware
///
/// Runs inside [`auth_middleware`], so the user is known for every
/// request that reaches a handler.
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .map(|u| u.0.email.clone())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user,
        status = status.as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "API request"
    );

    response
}
